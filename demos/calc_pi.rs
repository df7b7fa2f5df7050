use limbreal::Real256;

///! Calculate the value of PI using the Chudnovsky_algorithm.
///!  cargo run --example calc_pi --release

fn main() {
    // https://en.wikipedia.org/wiki/Chudnovsky_algorithm
    let iterations = 5;

    // Constants:
    let c1 = Real256::from_u64(10005).sqrt();
    let c2 = Real256::from_u64(545140134);
    let c3 = Real256::from_i64(-262537412640768000);

    // Initial state.
    let mut kc = Real256::from_u64(6);
    let mut m = Real256::from_u64(1);
    let mut l = Real256::from_u64(13591409);
    let mut x = Real256::from_u64(1);
    let mut s = Real256::from_u64(13591409);

    for q in 1..iterations + 1 {
        let q3 = Real256::from_u64(q * q * q);
        let k3 = kc * kc * kc;
        m = (k3 - kc * 16) * m / q3;
        l += c2;
        x *= c3;
        s += m * l / x;
        kc += 12;
    }
    let pi = Real256::from_u64(426880) * (c1 / s);
    println!("pi = {:.70}", pi);
    println!("     {:.70}", Real256::pi());
    assert_eq!(pi.as_f64(), std::f64::consts::PI);
}
