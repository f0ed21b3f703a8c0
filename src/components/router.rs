use crate::pages::{home_page::HomePage, quiz_page::QuizPage};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum AppRoute {
    #[at("/quiz")]
    QuizManagement,
    #[at("/")]
    Home,
}

pub struct Router {}
pub enum Message {}

fn switch(route: &AppRoute) -> Html {
    match route {
        AppRoute::Home => html! {<HomePage/>},
        AppRoute::QuizManagement => html! {<QuizPage/>},
    }
}

impl Component for Router {
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
            <Switch<AppRoute> render={Switch::render(switch)} />
        }
    }
}
