use affinity_nn::catalog::{builtin_catalog, User};
use affinity_nn::worker::{self, Event, Request, ScoreRequest, TrainOptions, TrainRequest};

fn main() {
    // --synthetic runs the stub engine: encoding + fake progress, no model.
    let synthetic = std::env::args().any(|a| a == "--synthetic");

    let products = builtin_catalog();
    let users = vec![
        User::new(19.0, vec![products[0].clone(), products[9].clone()]),
        User::new(26.0, vec![products[1].clone(), products[5].clone()]),
        User::new(34.0, vec![products[3].clone(), products[6].clone()]),
        User::new(45.0, vec![products[2].clone(), products[7].clone()]),
        User::new(52.0, vec![products[2].clone(), products[4].clone()]),
    ];

    let handle = worker::spawn(synthetic);

    let train = Request::Train(TrainRequest {
        users,
        products: Some(products.clone()),
        options: TrainOptions {
            epochs: 40,
            batch_size: 4,
            learning_rate: 0.5,
            synthetic: None,
        },
    });
    handle.requests.send(train).unwrap();

    loop {
        match handle.events.recv() {
            Ok(Event::Log { message }) => println!("log: {message}"),
            Ok(Event::Progress {
                progress,
                epoch,
                loss,
                ..
            }) => match (epoch, loss) {
                (Some(e), Some(l)) => {
                    println!("progress {:>5.1}%  epoch {e:>3}  loss {l:.6}", progress * 100.0)
                }
                (Some(e), None) => println!("progress {:>5.1}%  epoch {e:>3}", progress * 100.0),
                _ => println!("progress {:>5.1}%", progress * 100.0),
            },
            Ok(Event::Done {
                epochs,
                loss,
                accuracy,
                elapsed_ms,
            }) => {
                print!("done: {epochs} epochs in {elapsed_ms} ms");
                if let Some(l) = loss {
                    print!(", loss {l:.6}");
                }
                if let Some(a) = accuracy {
                    print!(", accuracy {:.1}%", a * 100.0);
                }
                println!();
                break;
            }
            Ok(Event::Error { message }) => {
                eprintln!("error: {message}");
                return;
            }
            Ok(_) => {}
            Err(_) => return,
        }
    }

    let shopper = User::new(23.0, vec![products[0].clone()]);
    handle
        .requests
        .send(Request::Score(ScoreRequest {
            user: shopper,
            top: Some(5),
        }))
        .unwrap();

    loop {
        match handle.events.recv() {
            Ok(Event::Result { scores }) => {
                println!("\ntop picks for a 23-year-old sneaker buyer:");
                for (i, s) in scores.iter().enumerate() {
                    println!("  {}. {:<16} {:.4}", i + 1, s.name, s.score);
                }
                break;
            }
            Ok(Event::Error { message }) => {
                eprintln!("error: {message}");
                break;
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }

    drop(handle.requests);
    let _ = handle.join.join();
}
