use affinity_nn::feature::MinMax;
use affinity_nn::{fit_once, ActivationFunction, LossType, Network, Sgd};

const TIERS: [&str; 3] = ["basic", "standard", "premium"];

fn main() {
    // (age, monthly income) -> pricing tier
    let people = vec![(22.0, 1800.0), (35.0, 4200.0), (58.0, 9500.0)];
    let labels = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ];

    let age_range = MinMax::new(
        people.iter().map(|p| p.0).fold(f64::INFINITY, f64::min),
        people.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max),
    );
    let income_range = MinMax::new(
        people.iter().map(|p| p.1).fold(f64::INFINITY, f64::min),
        people.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max),
    );

    let inputs: Vec<Vec<f64>> = people
        .iter()
        .map(|&(age, income)| vec![age_range.normalize(age), income_range.normalize(income)])
        .collect();

    let mut network = Network::new(vec![
        (4, 2, ActivationFunction::Sigmoid),
        (3, 4, ActivationFunction::Softmax),
    ]);

    let optimizer = Sgd::new(0.5);
    let epochs = 2000;

    for epoch in 0..epochs {
        let loss = fit_once(
            &mut network,
            &inputs,
            &labels,
            &optimizer,
            LossType::CrossEntropy,
        );
        if epoch % 200 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    println!();
    for (&(age, income), input) in people.iter().zip(inputs.iter()) {
        let out = network.forward(input);
        let best = argmax(&out);
        println!(
            "age {age:>4}, income {income:>7} -> {} ({:.1}% confident)",
            TIERS[best],
            out[best] * 100.0
        );
    }
}

fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, x) in v.iter().enumerate() {
        if *x > v[best] {
            best = i;
        }
    }
    best
}
