//! PDF job workflow: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export the component type and its message enum.
//! - Provide the `Component` implementation that delegates to
//!   `update::update` and `view::view`.
//! - Drop the polling interval and history guard on teardown so neither
//!   outlives the component.

use yew::prelude::*;

mod helpers;
mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::WorkflowComponent;

impl Component for WorkflowComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        WorkflowComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.poll = None;
        self.guard = None;
    }
}
