use super::{fetcher, notifier};
use crate::objects::{
    channel::{Channel, ChannelFields},
    JsError,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use yew_agent::{Agent, AgentLink, Bridge, Bridged, Context, Dispatched, Dispatcher, HandlerId};

/// Lifecycle of the channel list. `Loading` and `Errored` carry the last
/// successfully loaded list forward so a failed refresh never blanks a view
/// that already had data.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Idle,
    Loading(Option<Vec<Channel>>),
    Populated(Vec<Channel>),
    Errored(Option<Vec<Channel>>, String),
}

impl ListState {
    pub fn channels(&self) -> Option<&[Channel]> {
        match self {
            ListState::Idle => None,
            ListState::Loading(previous) => previous.as_deref(),
            ListState::Populated(channels) => Some(channels),
            ListState::Errored(previous, _) => previous.as_deref(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListState::Errored(_, message) => Some(message),
            _ => None,
        }
    }

    fn into_channels(self) -> Option<Vec<Channel>> {
        match self {
            ListState::Idle => None,
            ListState::Loading(previous) => previous,
            ListState::Populated(channels) => Some(channels),
            ListState::Errored(previous, _) => previous,
        }
    }

    fn begin(self) -> Self {
        ListState::Loading(self.into_channels())
    }

    fn complete(channels: Vec<Channel>) -> Self {
        ListState::Populated(channels)
    }

    fn fail(self, message: String) -> Self {
        ListState::Errored(self.into_channels(), message)
    }
}

#[derive(Debug)]
pub enum Request {
    GetChannels,
    GetChannel(String),
    CreateChannel(ChannelFields),
    UpdateChannel(String, ChannelFields),
    DeleteChannel(String),
}

#[derive(Debug, Clone)]
pub enum Response {
    Channels(ListState),
    Channel(Result<Channel, JsError>),
    CreateFinished(Result<Channel, JsError>),
    UpdateFinished(Result<Channel, JsError>),
    DeleteFinished(Result<(), JsError>),
}

pub enum Message {
    FetcherMessage(fetcher::Response),
}

enum PendingTask {
    List,
    Get(HandlerId),
    Create(HandlerId),
    Update(HandlerId),
    Delete(HandlerId),
}

/// Owns the client-side copy of the channel list and keeps it in sync with
/// the server: every mutation that succeeds is followed by a full list
/// refetch, never by a local patch.
pub struct Store {
    link: AgentLink<Store>,
    subscribers: HashSet<HandlerId>,
    state: ListState,
    fetcher: Box<dyn Bridge<fetcher::Fetcher>>,
    notifier: Dispatcher<notifier::Notifier>,
    pending: HashMap<Uuid, PendingTask>,
}

impl Store {
    fn broadcast_state(&self) {
        for subscriber in &self.subscribers {
            if subscriber.is_respondable() {
                self.link
                    .respond(*subscriber, Response::Channels(self.state.clone()));
            }
        }
    }

    fn refresh(&mut self) {
        let task_id = Uuid::new_v4();

        self.state = std::mem::replace(&mut self.state, ListState::Idle).begin();
        self.pending.insert(task_id, PendingTask::List);
        self.fetcher.send(fetcher::Request::ListChannels(task_id));
        self.broadcast_state();
    }

    fn process_handle_input(&mut self, msg: Request, handler_id: HandlerId) {
        match msg {
            Request::GetChannels => match self.state {
                ListState::Idle => self.refresh(),
                _ => self
                    .link
                    .respond(handler_id, Response::Channels(self.state.clone())),
            },
            Request::GetChannel(channel_id) => {
                let task_id = Uuid::new_v4();

                self.pending.insert(task_id, PendingTask::Get(handler_id));
                self.fetcher
                    .send(fetcher::Request::GetChannel(task_id, channel_id));
            }
            Request::CreateChannel(fields) => {
                let task_id = Uuid::new_v4();

                self.pending.insert(task_id, PendingTask::Create(handler_id));
                self.fetcher
                    .send(fetcher::Request::CreateChannel(task_id, fields));
            }
            Request::UpdateChannel(channel_id, fields) => {
                let task_id = Uuid::new_v4();

                self.pending.insert(task_id, PendingTask::Update(handler_id));
                self.fetcher
                    .send(fetcher::Request::UpdateChannel(task_id, channel_id, fields));
            }
            Request::DeleteChannel(channel_id) => {
                let task_id = Uuid::new_v4();

                self.pending.insert(task_id, PendingTask::Delete(handler_id));
                self.fetcher
                    .send(fetcher::Request::DeleteChannel(task_id, channel_id));
            }
        }
    }

    fn process_fetcher_message(&mut self, msg: fetcher::Response) -> Result<(), JsError> {
        match msg {
            fetcher::Response::Channels(task_id, res) => {
                self.take_pending(task_id)?;

                match res {
                    Ok(channels) => {
                        self.state = ListState::complete(channels);
                    }
                    Err(e) => {
                        self.state = std::mem::replace(&mut self.state, ListState::Idle)
                            .fail(e.description.clone());
                        self.notifier
                            .send(notifier::Request::Notify(notifier::Notification {
                                severity: notifier::NotificationSeverity::Error,
                                text: String::from("Failed to load channels"),
                            }));
                        log::error!("channel list refresh failed: {}", e);
                    }
                }
                self.broadcast_state();
            }
            fetcher::Response::Channel(task_id, res) => {
                if let PendingTask::Get(handler_id) = self.take_pending(task_id)? {
                    self.link.respond(handler_id, Response::Channel(res));
                }
            }
            fetcher::Response::Created(task_id, res) => {
                if let PendingTask::Create(handler_id) = self.take_pending(task_id)? {
                    let succeeded = res.is_ok();

                    self.link.respond(handler_id, Response::CreateFinished(res));

                    if succeeded {
                        self.refresh();
                    }
                }
            }
            fetcher::Response::Updated(task_id, res) => {
                if let PendingTask::Update(handler_id) = self.take_pending(task_id)? {
                    let succeeded = res.is_ok();

                    self.link.respond(handler_id, Response::UpdateFinished(res));

                    if succeeded {
                        self.refresh();
                    }
                }
            }
            fetcher::Response::Deleted(task_id, res) => {
                if let PendingTask::Delete(handler_id) = self.take_pending(task_id)? {
                    let succeeded = res.is_ok();

                    self.link.respond(handler_id, Response::DeleteFinished(res));

                    if succeeded {
                        self.refresh();
                    }
                }
            }
        }

        Ok(())
    }

    fn take_pending(&mut self, task_id: Uuid) -> Result<PendingTask, JsError> {
        self.pending
            .remove(&task_id)
            .ok_or_else(|| JsError::from(&*format!("no pending task for id {}", task_id)))
    }
}

impl Agent for Store {
    type Reach = Context<Self>;
    type Message = Message;
    type Input = Request;
    type Output = Response;

    fn create(link: AgentLink<Self>) -> Self {
        let fetcher_cb = link.callback(Message::FetcherMessage);

        Self {
            link,
            subscribers: HashSet::new(),
            state: ListState::Idle,
            fetcher: fetcher::Fetcher::bridge(fetcher_cb),
            notifier: notifier::Notifier::dispatcher(),
            pending: HashMap::new(),
        }
    }

    fn update(&mut self, msg: Self::Message) {
        match msg {
            Message::FetcherMessage(resp) => {
                if let Err(e) = self.process_fetcher_message(resp) {
                    self.notifier.send(notifier::Request::NotifyError(e));
                }
            }
        }
    }

    fn handle_input(&mut self, msg: Self::Input, handler_id: HandlerId) {
        self.process_handle_input(msg, handler_id);
    }

    fn connected(&mut self, id: HandlerId) {
        self.subscribers.insert(id);

        if id.is_respondable() {
            self.link.respond(id, Response::Channels(self.state.clone()));
        }
    }

    fn disconnected(&mut self, id: HandlerId) {
        self.subscribers.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn channel(id: &str, name: &str) -> Channel {
        Channel {
            id: id.into(),
            name: name.into(),
            description: None,
            questions_count: 0,
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap(),
        }
    }

    #[test]
    fn initial_load_failure_has_no_channels() {
        let state = ListState::Idle.begin().fail("boom".into());

        assert_eq!(state.channels(), None);
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn failed_refresh_retains_previous_list() {
        let populated = ListState::complete(vec![channel("1", "a"), channel("2", "b")]);
        let state = populated.begin().fail("boom".into());

        assert_eq!(state.channels().map(|c| c.len()), Some(2));
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn loading_carries_previous_list_forward() {
        let state = ListState::complete(vec![channel("1", "a")]).begin();

        assert!(state.is_loading());
        assert_eq!(state.channels().map(|c| c.len()), Some(1));
    }

    #[test]
    fn complete_replaces_the_whole_list() {
        let loading = ListState::complete(vec![channel("1", "a"), channel("2", "b")]).begin();
        assert!(loading.is_loading());

        let state = ListState::complete(vec![channel("3", "c")]);
        let channels = state.channels().unwrap();

        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].id, "3");
    }

    #[test]
    fn recovery_after_error_clears_the_message() {
        let retrying = ListState::Idle.begin().fail("boom".into()).begin();
        assert_eq!(retrying.error(), None);

        let state = ListState::complete(vec![channel("1", "a")]);

        assert_eq!(state.error(), None);
        assert_eq!(state.channels().map(|c| c.len()), Some(1));
    }
}
