use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use wasm_bindgen::{closure::Closure, JsCast};
use yew_agent::{Agent, AgentLink, Context, HandlerId};

use crate::objects::JsError;

const DISMISS_TIMEOUT_MS: i32 = 4_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationSeverity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub severity: NotificationSeverity,
}

#[derive(Debug)]
pub enum Request {
    Notify(Notification),
    NotifyError(JsError),
    Dismiss,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Response {
    Notification(Option<Notification>),
}

pub enum Message {
    DismissTimeout,
}

/// Holds the single notification slot. A new notification replaces the
/// current one; the slot is cleared either manually or by the dismiss timer.
pub struct Notifier {
    link: AgentLink<Self>,
    subscribers: HashSet<HandlerId>,
    notification: Option<Notification>,
    closure_timeout: Closure<dyn Fn()>,
    timeout_handle: Option<i32>,
}

impl Notifier {
    fn notify_subscribed(&self) {
        for subscriber in &self.subscribers {
            if subscriber.is_respondable() {
                self.link
                    .respond(*subscriber, Response::Notification(self.notification.clone()));
            }
        }
    }

    fn show(&mut self, notification: Notification) {
        match notification.severity {
            NotificationSeverity::Error => log::error!("{}", notification.text),
            NotificationSeverity::Warning => log::warn!("{}", notification.text),
            NotificationSeverity::Success => log::info!("{}", notification.text),
        }
        self.notification = Some(notification);
        self.schedule_dismiss();
    }

    fn schedule_dismiss(&mut self) {
        let window = match web_sys::window() {
            Some(window) => window,
            None => {
                log::error!("could not obtain window");
                return;
            }
        };

        self.cancel_dismiss(&window);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.closure_timeout.as_ref().unchecked_ref(),
            DISMISS_TIMEOUT_MS,
        ) {
            Ok(handle) => self.timeout_handle = Some(handle),
            Err(e) => log::error!("could not schedule notification dismissal: {:?}", e),
        }
    }

    fn cancel_dismiss(&mut self, window: &web_sys::Window) {
        if let Some(handle) = self.timeout_handle.take() {
            window.clear_timeout_with_handle(handle);
        }
    }
}

impl Agent for Notifier {
    type Reach = Context<Self>;
    type Message = Message;
    type Input = Request;
    type Output = Response;

    fn create(link: AgentLink<Self>) -> Self {
        let callback_timeout = link.callback(|_| Message::DismissTimeout);
        let closure_timeout =
            Closure::wrap(Box::new(move || callback_timeout.emit(())) as Box<dyn Fn()>);

        Self {
            link,
            subscribers: HashSet::new(),
            notification: None,
            closure_timeout,
            timeout_handle: None,
        }
    }

    fn update(&mut self, msg: Self::Message) {
        match msg {
            Message::DismissTimeout => {
                self.timeout_handle = None;
                self.notification = None;
                self.notify_subscribed();
            }
        }
    }

    fn handle_input(&mut self, msg: Self::Input, _id: HandlerId) {
        match msg {
            Request::Notify(notification) => self.show(notification),
            Request::NotifyError(err) => self.show(Notification {
                severity: NotificationSeverity::Error,
                text: err.description,
            }),
            Request::Dismiss => {
                if let Some(window) = web_sys::window() {
                    self.cancel_dismiss(&window);
                }
                self.notification = None;
            }
        }
        self.notify_subscribed();
    }

    fn connected(&mut self, id: HandlerId) {
        self.subscribers.insert(id);
        self.notify_subscribed();
    }

    fn disconnected(&mut self, id: HandlerId) {
        self.subscribers.remove(&id);
    }
}
