use crate::app::App;

mod api;
mod app;
mod components;
mod history;
mod store;

fn main() {
    yew::Renderer::<App>::new().render();
}
