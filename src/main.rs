use actix_web::{web, App, HttpServer};
use clap::Parser;

use serial_keygen::api::{self, AppState};
use serial_keygen::config::{Cli, Command, GenerateArgs, ServeArgs};
use serial_keygen::generator::positive_count;
use serial_keygen::key_store::open_store;
use serial_keygen::{logger, GeneratorConfig, SerialKeyGenerator, StoreSettings};

fn generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let count = positive_count(args.count)?;
    let settings = StoreSettings::from(args.store);
    let mut store = open_store(&settings)?;
    let mut generator = SerialKeyGenerator::with_config(GeneratorConfig::from(args.generator));

    let keys = generator.generate_valid_keys(&args.prefix, &args.suffix, count, &mut *store)?;

    println!("Generated keys:");
    for key in &keys {
        println!("{}", key);
    }

    println!("\nStored keys:");
    for key in store.get_all()? {
        println!("{}", key);
    }

    Ok(())
}

async fn serve(args: ServeArgs) -> std::io::Result<()> {
    let state = web::Data::new(AppState {
        store: StoreSettings::from(args.store),
        generator: GeneratorConfig::from(args.generator),
    });
    tracing::info!(
        bind = %args.bind,
        port = args.port,
        store = ?state.store.backend,
        "starting serial key server"
    );

    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
        .bind((args.bind.as_str(), args.port))?
        .run()
        .await
}

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => generate(args),
        Command::Serve(args) => serve(args).await.map_err(Into::into),
    };

    if let Err(e) = result {
        tracing::error!("serial-keygen failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
