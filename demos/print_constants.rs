use limbreal::Real;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

///! Prints the constant table at two precisions. The constant tables are built
///! on first use, which is logged at the debug level.
///!  RUST_LOG=limbreal=debug cargo run --example print_constants

fn print_table<const LIMBS: usize>() {
    let constants: [(&str, fn() -> Real<LIMBS>); 16] = [
        ("pi", Real::pi),
        ("e", Real::e),
        ("ln2", Real::ln2),
        ("ln10", Real::ln10),
        ("log2e", Real::log2e),
        ("log10e", Real::log10e),
        ("pi/2", Real::pi_2),
        ("pi/3", Real::pi_3),
        ("pi/4", Real::pi_4),
        ("tau", Real::tau),
        ("1/pi", Real::frac_1_pi),
        ("2/pi", Real::frac_2_pi),
        ("2/sqrt(pi)", Real::frac_2_sqrt_pi),
        ("sqrt(2)", Real::sqrt2),
        ("sqrt(3)", Real::sqrt3),
        ("sqrt(1/2)", Real::sqrt1_2),
    ];
    println!("{} bits:", Real::<LIMBS>::TOTAL_BITS);
    for (name, value) in constants {
        println!("  {:>10} = {}", name, value());
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("limbreal=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    // Real128 and Real512.
    print_table::<4>();
    print_table::<16>();
}
