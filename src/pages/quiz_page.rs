use crate::components::{ChannelManager, NavBar, Notification};
use yew::{prelude::*, Html};

pub struct QuizPage {}
pub enum Message {}

impl Component for QuizPage {
    type Message = Message;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {}
    }

    fn update(&mut self, _ctx: &Context<Self>, _msg: Self::Message) -> bool {
        false
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <>
                <NavBar/>
                <Notification/>
                <ChannelManager/>
            </>
        }
    }
}
