use crate::components::{router::AppRoute, NavBar};
use yew::prelude::*;
use yew_router::prelude::Link;

pub struct HomePage {}
pub enum Message {}

impl Component for HomePage {
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
                <section class="hero">
                    <div class="hero-body">
                        <p class="title">{"Quiz Admin"}</p>
                        <p class="subtitle">{"Manage quiz channels and their questions"}</p>
                        <Link<AppRoute> classes={classes!("button", "is-primary")} to={AppRoute::QuizManagement}>{"Quiz Management"}</Link<AppRoute>>
                    </div>
                </section>
            </>
        }
    }
}
