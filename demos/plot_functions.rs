use limbreal::Real256;

///! Samples Franke's function and Matlab's peaks function on a grid, and
///! prints them as a coarse text plot.
///!  cargo run --example plot_functions --release

const SHADES: &[u8] = b" .:-=+*#%@";

fn plot<F>(name: &str, lo: f64, hi: f64, f: F)
where
    F: Fn(&Real256, &Real256) -> Real256,
{
    let size = 24;
    let step = (hi - lo) / size as f64;

    let mut rows = Vec::new();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for j in 0..size {
        let y = Real256::from_f64(hi - step * j as f64);
        let mut row = Vec::new();
        for i in 0..2 * size {
            let x = Real256::from_f64(lo + step * i as f64 / 2.0);
            let v = f(&x, &y).as_f64();
            min = min.min(v);
            max = max.max(v);
            row.push(v);
        }
        rows.push(row);
    }

    println!("{} in [{}, {}], values in [{:.4}, {:.4}]", name, lo, hi, min, max);
    for row in rows {
        let line: String = row
            .iter()
            .map(|v| {
                let t = (v - min) / (max - min);
                let idx = (t * (SHADES.len() - 1) as f64).round() as usize;
                SHADES[idx.min(SHADES.len() - 1)] as char
            })
            .collect();
        println!("{}", line);
    }
    println!();
}

fn main() {
    plot("franke", 0.0, 1.0, Real256::franke);
    plot("peaks", -3.0, 3.0, Real256::peaks);

    let half = Real256::from_f64(0.5);
    println!("franke(0.5, 0.5) = {:.40}", Real256::franke(&half, &half));
    println!("peaks(0.5, 0.5)  = {:.40}", Real256::peaks(&half, &half));
}
