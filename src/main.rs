use yew_slide_panel::components::App;
use yew_slide_panel::util::init_logging;

fn main() {
    init_logging();
    log::info!("slide panel demo starting");
    yew::Renderer::<App>::new().render();
}
