use limbreal::Real512;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

///! Calculates e and prints it.
///!  RUST_LOG=limbreal=debug cargo run --example print_e --release

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("limbreal=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let val = Real512::e();
    println!("F64:     {}", val.as_f64());
    println!("Real512: {}", val);
    println!("Hex:     {:x}", val);
}
