use std::io;
use std::time::Duration;

use gated_rwlock::{Actor, Authenticity, CredentialStore, Role, Schedule, Workload};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Three known codes, one writer holding one of them and a reader with a forged one
    let store = CredentialStore::from_codes([111_111, 222_222, 333_333]);
    let actors = vec![
        Actor::new(0, Role::Writer, Authenticity::Real, 111_111),
        Actor::new(0, Role::Reader, Authenticity::Dummy, 999_999),
    ];
    let schedule = Schedule {
        rounds: 1,
        pause: Duration::from_millis(10),
    };

    let report = Workload::from_parts(store, actors, schedule, io::stdout()).run()?;

    println!("Final value: {}", report.final_value);
    Ok(())
}
