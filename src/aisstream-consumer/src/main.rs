use aisstream_consumer::{
    settings::Settings,
    startup::{App, init_tracing},
};

#[tokio::main]
async fn main() {
    let settings = Settings::new().unwrap();
    init_tracing(&settings.log_level);

    let app = App::build(&settings);

    app.run().await.unwrap();
}
