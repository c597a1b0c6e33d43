// This binary crate is intentionally minimal.
// All encoding, training, and worker logic lives in the library.
// Run demos with:
//   cargo run --example tiers
//   cargo run --example affinity
fn main() {
    println!("affinity-nn: product affinity scoring on a from-scratch neural network.");
    println!("Run `cargo run --example tiers` for the pricing-tier demo,");
    println!("or `cargo run --bin affinity-worker` to serve the worker over HTTP.");
}
