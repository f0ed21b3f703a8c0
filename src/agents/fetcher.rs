use crate::objects::{
    channel::{Channel, ChannelFields, ChannelListBody},
    JsError,
};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use yew_agent::{Agent, AgentLink, Context, HandlerId};

const BASE_PATH: &str = "/channel";

/// One request variant per remote channel operation. The `Uuid` is a task id
/// chosen by the caller; the matching response carries it back so callers can
/// correlate outcomes with whatever they had in flight.
#[derive(Debug)]
pub enum Request {
    ListChannels(Uuid),
    GetChannel(Uuid, String),
    CreateChannel(Uuid, ChannelFields),
    UpdateChannel(Uuid, String, ChannelFields),
    DeleteChannel(Uuid, String),
}

#[derive(Debug)]
pub enum Response {
    Channels(Uuid, Result<Vec<Channel>, JsError>),
    Channel(Uuid, Result<Channel, JsError>),
    Created(Uuid, Result<Channel, JsError>),
    Updated(Uuid, Result<Channel, JsError>),
    Deleted(Uuid, Result<(), JsError>),
}

#[derive(Debug)]
pub enum Message {
    ReceiveChannels(HandlerId, Uuid, Result<Vec<Channel>, JsError>),
    ReceiveChannel(HandlerId, Uuid, Result<Channel, JsError>),
    ReceiveCreated(HandlerId, Uuid, Result<Channel, JsError>),
    ReceiveUpdated(HandlerId, Uuid, Result<Channel, JsError>),
    ReceiveDeleted(HandlerId, Uuid, Result<(), JsError>),
}

pub struct Fetcher {
    link: AgentLink<Self>,
    subscribers: HashSet<HandlerId>,
}

enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl Agent for Fetcher {
    type Reach = Context<Self>;
    type Message = Message;
    type Input = Request;
    type Output = Response;

    fn create(link: AgentLink<Self>) -> Self {
        Self {
            link,
            subscribers: HashSet::new(),
        }
    }

    fn update(&mut self, msg: Self::Message) {
        match msg {
            Message::ReceiveChannels(handler_id, task_id, res) => {
                self.link.respond(handler_id, Response::Channels(task_id, res));
            }
            Message::ReceiveChannel(handler_id, task_id, res) => {
                self.link.respond(handler_id, Response::Channel(task_id, res));
            }
            Message::ReceiveCreated(handler_id, task_id, res) => {
                self.link.respond(handler_id, Response::Created(task_id, res));
            }
            Message::ReceiveUpdated(handler_id, task_id, res) => {
                self.link.respond(handler_id, Response::Updated(task_id, res));
            }
            Message::ReceiveDeleted(handler_id, task_id, res) => {
                self.link.respond(handler_id, Response::Deleted(task_id, res));
            }
        }
    }

    fn handle_input(&mut self, msg: Self::Input, id: HandlerId) {
        match msg {
            Request::ListChannels(task_id) => {
                self.link.send_future(async move {
                    Message::ReceiveChannels(id, task_id, list_channels().await)
                });
            }
            Request::GetChannel(task_id, channel_id) => {
                self.link.send_future(async move {
                    Message::ReceiveChannel(id, task_id, get_channel(&channel_id).await)
                });
            }
            Request::CreateChannel(task_id, fields) => {
                self.link.send_future(async move {
                    Message::ReceiveCreated(id, task_id, create_channel(&fields).await)
                });
            }
            Request::UpdateChannel(task_id, channel_id, fields) => {
                self.link.send_future(async move {
                    Message::ReceiveUpdated(id, task_id, update_channel(&channel_id, &fields).await)
                });
            }
            Request::DeleteChannel(task_id, channel_id) => {
                self.link.send_future(async move {
                    Message::ReceiveDeleted(id, task_id, delete_channel(&channel_id).await)
                });
            }
        }
    }

    fn connected(&mut self, id: HandlerId) {
        self.subscribers.insert(id);
    }

    fn disconnected(&mut self, id: HandlerId) {
        self.subscribers.remove(&id);
    }
}

async fn list_channels() -> Result<Vec<Channel>, JsError> {
    let body = fetch_text(BASE_PATH, HttpMethod::Get, None).await?;

    serde_json::from_str::<ChannelListBody>(&body)
        .map(ChannelListBody::into_channels)
        .map_err(Into::into)
}

async fn get_channel(channel_id: &str) -> Result<Channel, JsError> {
    let body = fetch_text(
        &format!("{}/{}", BASE_PATH, channel_id),
        HttpMethod::Get,
        None,
    )
    .await?;

    serde_json::from_str(&body).map_err(Into::into)
}

async fn create_channel(fields: &ChannelFields) -> Result<Channel, JsError> {
    let body = fetch_text(
        BASE_PATH,
        HttpMethod::Post,
        Some(serde_json::to_string(fields)?),
    )
    .await?;

    serde_json::from_str(&body).map_err(Into::into)
}

async fn update_channel(channel_id: &str, fields: &ChannelFields) -> Result<Channel, JsError> {
    let body = fetch_text(
        &format!("{}/{}", BASE_PATH, channel_id),
        HttpMethod::Put,
        Some(serde_json::to_string(fields)?),
    )
    .await?;

    serde_json::from_str(&body).map_err(Into::into)
}

async fn delete_channel(channel_id: &str) -> Result<(), JsError> {
    // the deletion confirmation body has no specified shape; discard it
    fetch(
        &format!("{}/{}", BASE_PATH, channel_id),
        HttpMethod::Delete,
        None,
        None,
    )
    .await
    .map(|_| ())
}

async fn fetch(
    url: &str,
    method: HttpMethod,
    headers: Option<HashMap<String, String>>,
    body: Option<String>,
) -> Result<web_sys::Response, JsError> {
    let mut opts = web_sys::RequestInit::new();

    opts.method(method.as_str());

    if let Some(headers) = headers {
        let opt_headers = web_sys::Headers::new()?;

        for (key, val) in headers {
            opt_headers.append(&key, &val)?;
        }

        opts.headers(&opt_headers);
    }

    if let Some(val) = body {
        opts.body(Some(&serde_wasm_bindgen::to_value(&val)?));
    }

    let request = web_sys::Request::new_with_str_and_init(url, &opts)?;
    let window = web_sys::window().ok_or("error getting window")?;
    let resp: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    match resp.ok() {
        true => Ok(resp),
        false => {
            let body = match resp.text() {
                Ok(promise) => JsFuture::from(promise).await.ok().and_then(|v| v.as_string()),
                Err(_) => None,
            };

            Err(response_error(
                resp.status(),
                &resp.status_text(),
                body.as_deref(),
            ))
        }
    }
}

async fn fetch_text(url: &str, method: HttpMethod, body: Option<String>) -> Result<String, JsError> {
    let headers = body.as_ref().map(|_| {
        HashMap::from([(String::from("Content-Type"), String::from("application/json"))])
    });

    JsFuture::from(fetch(url, method, headers, body).await?.text()?)
        .await?
        .as_string()
        .ok_or("error casting fetched value to string".into())
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Normalizes a non-2xx response: prefer the server-supplied structured error
/// payload when the body carries one, else fall back to the status line.
fn response_error(status: u16, status_text: &str, body: Option<&str>) -> JsError {
    body.and_then(|body| serde_json::from_str::<ErrorBody>(body).ok())
        .and_then(|e| e.message)
        .map(|message| JsError {
            description: message,
        })
        .unwrap_or_else(|| JsError::from(&*format!("fetcher error: {}: {}", status, status_text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_error_prefers_server_message() {
        let err = response_error(409, "Conflict", Some(r#"{"message": "channel name taken"}"#));

        assert_eq!(err.description, "channel name taken");
    }

    #[test]
    fn response_error_falls_back_to_status_line() {
        let err = response_error(500, "Internal Server Error", None);

        assert_eq!(err.description, "fetcher error: 500: Internal Server Error");
    }

    #[test]
    fn response_error_ignores_unstructured_body() {
        let err = response_error(502, "Bad Gateway", Some("<html>upstream died</html>"));

        assert_eq!(err.description, "fetcher error: 502: Bad Gateway");
    }
}
