use crate::agents::{
    notifier::{self, Notifier},
    store::{self, ListState, Store},
};
use crate::components::icon::{Icon, IconStyle};
use crate::objects::{
    channel::{Channel, ChannelFields},
    JsError,
};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_agent::{Bridge, Bridged, Dispatched, Dispatcher};

/// Which dialog, if any, is open. Channel-scoped dialogs hold the id of the
/// channel they were opened for and re-resolve it against the current list
/// snapshot whenever they need the record itself.
#[derive(Debug, Clone, PartialEq)]
enum DialogMode {
    Closed,
    CreateChannel,
    EditChannel(String),
    AddQuestion(String),
    BulkUpload(String),
}

impl DialogMode {
    fn references(&self) -> Option<&str> {
        match self {
            DialogMode::Closed | DialogMode::CreateChannel => None,
            DialogMode::EditChannel(id) | DialogMode::AddQuestion(id) | DialogMode::BulkUpload(id) => {
                Some(id)
            }
        }
    }

    fn survives_refresh(&self, channels: &[Channel]) -> bool {
        match self.references() {
            Some(id) => channels.iter().any(|channel| channel.id == id),
            None => true,
        }
    }
}

pub struct ChannelManager {
    state: ListState,
    dialog: DialogMode,
    name: String,
    description: String,
    busy: bool,
    store: Box<dyn Bridge<Store>>,
    notifier: Dispatcher<Notifier>,
}

pub enum Message {
    StoreMessage(store::Response),
    OpenCreate,
    OpenEdit(String),
    OpenAddQuestion(String),
    OpenBulkUpload(String),
    CloseDialog,
    SetName(String),
    SetDescription(String),
    SubmitChannel,
    Delete(String),
}

impl ChannelManager {
    fn notify(&mut self, severity: notifier::NotificationSeverity, text: String) {
        self.notifier
            .send(notifier::Request::Notify(notifier::Notification {
                text,
                severity,
            }));
    }

    fn notify_success(&mut self, text: &str) {
        self.notify(notifier::NotificationSeverity::Success, text.into());
    }

    fn notify_failure(&mut self, error: &JsError, fallback: &str) {
        let text = match error.description.is_empty() {
            true => String::from(fallback),
            false => error.description.clone(),
        };
        self.notify(notifier::NotificationSeverity::Error, text);
    }

    fn find_channel(&self, id: &str) -> Option<&Channel> {
        self.state
            .channels()
            .and_then(|channels| channels.iter().find(|channel| channel.id == id))
    }

    fn channel_name(&self, id: &str) -> String {
        self.find_channel(id)
            .map(|channel| channel.name.clone())
            .unwrap_or_default()
    }

    fn process_store_message(&mut self, response: store::Response) -> bool {
        match response {
            store::Response::Channels(state) => {
                self.state = state;

                if let Some(channels) = self.state.channels() {
                    if !self.dialog.survives_refresh(channels) {
                        self.dialog = DialogMode::Closed;
                    }
                }
                true
            }
            store::Response::Channel(res) => match res {
                Ok(channel) => {
                    if self.dialog == DialogMode::EditChannel(channel.id.clone()) {
                        self.name = channel.name;
                        self.description = channel.description.unwrap_or_default();
                        return true;
                    }
                    false
                }
                Err(e) => {
                    log::info!("could not re-resolve channel: {}", e);
                    false
                }
            },
            store::Response::CreateFinished(res) => {
                self.busy = false;
                match res {
                    Ok(_) => {
                        self.dialog = DialogMode::Closed;
                        self.name.clear();
                        self.description.clear();
                        self.notify_success("Channel created successfully");
                    }
                    Err(e) => self.notify_failure(&e, "Failed to create channel"),
                }
                true
            }
            store::Response::UpdateFinished(res) => {
                self.busy = false;
                match res {
                    Ok(_) => {
                        self.dialog = DialogMode::Closed;
                        self.name.clear();
                        self.description.clear();
                        self.notify_success("Channel updated successfully");
                    }
                    Err(e) => self.notify_failure(&e, "Failed to update channel"),
                }
                true
            }
            store::Response::DeleteFinished(res) => {
                match res {
                    Ok(()) => self.notify_success("Channel deleted successfully"),
                    Err(e) => self.notify_failure(&e, "Failed to delete channel"),
                }
                false
            }
        }
    }

    fn submit_channel(&mut self) -> bool {
        let fields = ChannelFields {
            name: self.name.clone(),
            description: match self.description.trim().is_empty() {
                true => None,
                false => Some(self.description.clone()),
            },
        };

        if !fields.has_name() {
            self.notify(
                notifier::NotificationSeverity::Warning,
                String::from("Channel name is required"),
            );
            return false;
        }

        self.busy = true;
        match &self.dialog {
            DialogMode::EditChannel(id) => self
                .store
                .send(store::Request::UpdateChannel(id.clone(), fields)),
            _ => self.store.send(store::Request::CreateChannel(fields)),
        }
        true
    }

    fn view_header(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="level">
                <div class="level-left">
                    <h1 class="title">{"Quiz Channels"}</h1>
                </div>
                <div class="level-right">
                    <button class="button is-primary" disabled={self.busy || self.state.is_loading()} onclick={ctx.link().callback(|_| Message::OpenCreate)}>
                        <Icon name="add" style={IconStyle::Filled}/>
                        <span>{"Create Quiz Channel"}</span>
                    </button>
                </div>
            </div>
        }
    }

    fn view_channels(&self, ctx: &Context<Self>) -> Html {
        match self.state.channels() {
            Some(channels) => match channels.is_empty() {
                true => html! {
                    <div class="has-text-centered">
                        <p class="title is-5 has-text-grey">{"No channels created yet"}</p>
                        <p class="subtitle is-6 has-text-grey">{"Click \"Create Quiz Channel\" to get started"}</p>
                    </div>
                },
                false => html! {
                    <div class="columns is-multiline">
                        { channels.iter().map(|channel| self.view_channel_card(ctx, channel)).collect::<Html>() }
                    </div>
                },
            },
            None => match self.state.error() {
                Some(message) => html! { <div class="notification is-danger">{message}</div> },
                None => html! { <progress class="progress is-primary" max="100"></progress> },
            },
        }
    }

    fn view_channel_card(&self, ctx: &Context<Self>, channel: &Channel) -> Html {
        let add_question_id = channel.id.clone();
        let bulk_upload_id = channel.id.clone();
        let edit_id = channel.id.clone();
        let delete_id = channel.id.clone();

        html! {
            <div class="column is-half">
                <div class="card">
                    <div class="card-content">
                        <p class="title is-5">{&channel.name}</p>
                        <p class="subtitle is-6">{channel.description_text()}</p>
                        <div class="tags">
                            <span class="tag">{format!("{} Questions", channel.questions_count)}</span>
                            <span class="tag is-primary">{channel.created_at.format("%Y-%m-%d").to_string()}</span>
                        </div>
                    </div>
                    <footer class="card-footer">
                        <a class="card-footer-item" onclick={ctx.link().callback(move |_| Message::OpenAddQuestion(add_question_id.clone()))}>{"Add Question"}</a>
                        <a class="card-footer-item" onclick={ctx.link().callback(move |_| Message::OpenBulkUpload(bulk_upload_id.clone()))}>{"Add in Bulk"}</a>
                        <a class="card-footer-item" onclick={ctx.link().callback(move |_| Message::OpenEdit(edit_id.clone()))}>{"Edit"}</a>
                        <a class="card-footer-item has-text-danger" onclick={ctx.link().callback(move |_| Message::Delete(delete_id.clone()))}>{"Delete"}</a>
                    </footer>
                </div>
            </div>
        }
    }

    fn view_dialog(&self, ctx: &Context<Self>) -> Html {
        match &self.dialog {
            DialogMode::Closed => html! {},
            DialogMode::CreateChannel => self.view_channel_dialog(ctx, "Create New Quiz Channel", "Create"),
            DialogMode::EditChannel(_) => self.view_channel_dialog(ctx, "Edit Quiz Channel", "Save"),
            DialogMode::AddQuestion(id) => self.view_add_question_dialog(ctx, id),
            DialogMode::BulkUpload(id) => self.view_bulk_upload_dialog(ctx, id),
        }
    }

    fn view_channel_dialog(&self, ctx: &Context<Self>, title: &str, submit_label: &str) -> Html {
        html! {
            <div class="modal is-active">
                <div class="modal-background" onclick={ctx.link().callback(|_| Message::CloseDialog)}></div>
                <div class="modal-card">
                    <header class="modal-card-head">
                        <p class="modal-card-title">{title}</p>
                        <button class="delete" aria-label="close" disabled={self.busy} onclick={ctx.link().callback(|_| Message::CloseDialog)}></button>
                    </header>
                    <section class="modal-card-body">
                        <div class="field">
                            <label class="label">{"Channel Name"}</label>
                            <div class="control">
                                <input class="input" type="text" placeholder="e.g. Ai developer MCQ"
                                    value={self.name.clone()}
                                    oninput={ctx.link().callback(|e: InputEvent| Message::SetName(e.target_unchecked_into::<HtmlInputElement>().value()))}/>
                            </div>
                        </div>
                        <div class="field">
                            <label class="label">{"Channel Description"}</label>
                            <div class="control">
                                <textarea class="textarea" rows="3" placeholder="e.g. Its about ai exam and its summary for quick learning of user."
                                    value={self.description.clone()}
                                    oninput={ctx.link().callback(|e: InputEvent| Message::SetDescription(e.target_unchecked_into::<HtmlTextAreaElement>().value()))}>
                                </textarea>
                            </div>
                        </div>
                    </section>
                    <footer class="modal-card-foot">
                        <button class="button" disabled={self.busy} onclick={ctx.link().callback(|_| Message::CloseDialog)}>{"Cancel"}</button>
                        <button class={classes!("button", "is-primary", self.busy.then(|| "is-loading"))} disabled={self.busy} onclick={ctx.link().callback(|_| Message::SubmitChannel)}>{submit_label}</button>
                    </footer>
                </div>
            </div>
        }
    }

    fn view_add_question_dialog(&self, ctx: &Context<Self>, channel_id: &str) -> Html {
        html! {
            <div class="modal is-active">
                <div class="modal-background" onclick={ctx.link().callback(|_| Message::CloseDialog)}></div>
                <div class="modal-card">
                    <header class="modal-card-head">
                        <p class="modal-card-title">{format!("Add Question to {}", self.channel_name(channel_id))}</p>
                        <button class="delete" aria-label="close" onclick={ctx.link().callback(|_| Message::CloseDialog)}></button>
                    </header>
                    <section class="modal-card-body">
                        <div class="field">
                            <label class="label">{"Question"}</label>
                            <div class="control"><textarea class="textarea" rows="2"></textarea></div>
                        </div>
                        <div class="field">
                            <label class="label">{"Option A"}</label>
                            <div class="control"><input class="input" type="text"/></div>
                        </div>
                        <div class="field">
                            <label class="label">{"Option B"}</label>
                            <div class="control"><input class="input" type="text"/></div>
                        </div>
                        <div class="field">
                            <label class="label">{"Option C"}</label>
                            <div class="control"><input class="input" type="text"/></div>
                        </div>
                        <div class="field">
                            <label class="label">{"Option D"}</label>
                            <div class="control"><input class="input" type="text"/></div>
                        </div>
                        <div class="field">
                            <label class="label">{"Correct Answer"}</label>
                            <div class="control">
                                <div class="select is-fullwidth">
                                    <select>
                                        <option value="">{"Select correct answer"}</option>
                                        <option value="A">{"A"}</option>
                                        <option value="B">{"B"}</option>
                                        <option value="C">{"C"}</option>
                                        <option value="D">{"D"}</option>
                                    </select>
                                </div>
                            </div>
                        </div>
                        <div class="field">
                            <label class="label">{"Points"}</label>
                            <div class="control"><input class="input" type="number" value="10"/></div>
                        </div>
                    </section>
                    <footer class="modal-card-foot">
                        <button class="button" onclick={ctx.link().callback(|_| Message::CloseDialog)}>{"Cancel"}</button>
                        // question submission is not wired up yet; confirming only closes the dialog
                        <button class="button is-primary" onclick={ctx.link().callback(|_| Message::CloseDialog)}>{"Add Question"}</button>
                    </footer>
                </div>
            </div>
        }
    }

    fn view_bulk_upload_dialog(&self, ctx: &Context<Self>, channel_id: &str) -> Html {
        html! {
            <div class="modal is-active">
                <div class="modal-background" onclick={ctx.link().callback(|_| Message::CloseDialog)}></div>
                <div class="modal-card">
                    <header class="modal-card-head">
                        <p class="modal-card-title">{format!("Bulk Upload Questions to {}", self.channel_name(channel_id))}</p>
                        <button class="delete" aria-label="close" onclick={ctx.link().callback(|_| Message::CloseDialog)}></button>
                    </header>
                    <section class="modal-card-body">
                        <p class="mb-4">{"Upload a CSV or JSON file containing multiple questions"}</p>
                        <div class="file is-fullwidth mb-4">
                            <label class="file-label">
                                <input class="file-input" type="file" accept=".csv,.json"/>
                                <span class="file-cta">
                                    <Icon name="upload" style={IconStyle::Filled}/>
                                    <span class="file-label">{"Choose File"}</span>
                                </span>
                            </label>
                        </div>
                        <div class="box">
                            <pre>{"CSV Format:\nquestion,optionA,optionB,optionC,optionD,correctAnswer,points\n\"What is 2+2?\",\"2\",\"3\",\"4\",\"5\",\"C\",10"}</pre>
                        </div>
                    </section>
                    <footer class="modal-card-foot">
                        <button class="button" onclick={ctx.link().callback(|_| Message::CloseDialog)}>{"Cancel"}</button>
                        // file parsing is not wired up yet; confirming only closes the dialog
                        <button class="button is-primary" onclick={ctx.link().callback(|_| Message::CloseDialog)}>{"Upload Questions"}</button>
                    </footer>
                </div>
            </div>
        }
    }
}

impl Component for ChannelManager {
    type Message = Message;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let cb = ctx.link().callback(Message::StoreMessage);
        let mut store = Store::bridge(cb);

        store.send(store::Request::GetChannels);

        Self {
            state: ListState::Idle,
            dialog: DialogMode::Closed,
            name: String::new(),
            description: String::new(),
            busy: false,
            store,
            notifier: Notifier::dispatcher(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Message::StoreMessage(response) => self.process_store_message(response),
            Message::OpenCreate => {
                self.dialog = DialogMode::CreateChannel;
                true
            }
            Message::OpenEdit(id) => match self.find_channel(&id).cloned() {
                Some(channel) => {
                    self.name = channel.name;
                    self.description = channel.description.unwrap_or_default();
                    self.dialog = DialogMode::EditChannel(id.clone());
                    self.store.send(store::Request::GetChannel(id));
                    true
                }
                None => false,
            },
            Message::OpenAddQuestion(id) => {
                self.dialog = DialogMode::AddQuestion(id);
                true
            }
            Message::OpenBulkUpload(id) => {
                self.dialog = DialogMode::BulkUpload(id);
                true
            }
            Message::CloseDialog => match self.busy {
                true => false,
                false => {
                    self.dialog = DialogMode::Closed;
                    true
                }
            },
            Message::SetName(name) => {
                self.name = name;
                true
            }
            Message::SetDescription(description) => {
                self.description = description;
                true
            }
            Message::SubmitChannel => self.submit_channel(),
            Message::Delete(id) => {
                self.store.send(store::Request::DeleteChannel(id));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <section class="section">
                { self.view_header(ctx) }
                { self.view_channels(ctx) }
                { self.view_dialog(ctx) }
            </section>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn channel(id: &str) -> Channel {
        Channel {
            id: id.into(),
            name: format!("channel {}", id),
            description: None,
            questions_count: 0,
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap(),
        }
    }

    #[test]
    fn unscoped_dialogs_survive_any_refresh() {
        assert!(DialogMode::Closed.survives_refresh(&[]));
        assert!(DialogMode::CreateChannel.survives_refresh(&[]));
        assert!(DialogMode::CreateChannel.survives_refresh(&[channel("1")]));
    }

    #[test]
    fn channel_scoped_dialog_survives_while_channel_exists() {
        let channels = vec![channel("1"), channel("2")];

        assert!(DialogMode::AddQuestion("2".into()).survives_refresh(&channels));
        assert!(DialogMode::BulkUpload("1".into()).survives_refresh(&channels));
        assert!(DialogMode::EditChannel("1".into()).survives_refresh(&channels));
    }

    #[test]
    fn channel_scoped_dialog_closes_when_channel_disappears() {
        let channels = vec![channel("1")];

        assert!(!DialogMode::AddQuestion("2".into()).survives_refresh(&channels));
        assert!(!DialogMode::BulkUpload("2".into()).survives_refresh(&channels));
        assert!(!DialogMode::EditChannel("2".into()).survives_refresh(&channels));
    }
}
