use std::sync::Arc;
use std::thread::spawn;

use gated_rwlock::RwLock;

fn main() {
    let lock = Arc::new(RwLock::new(0));

    {
        let mut locked = lock.write();
        *locked = 2;
    }
    {
        let mut locked = lock.write();
        *locked += 2;
    }

    // Any number of readers may look at the value at the same time
    let readers: Vec<_> = (0..4)
        .map(|idx| {
            let lock = lock.clone();
            spawn(move || {
                let locked = lock.read();
                println!("Reader {} sees: {} ({} inside)", idx, *locked, lock.reader_count());
            })
        })
        .collect();

    for reader in readers {
        reader.join().expect("reader panicked");
    }

    println!("Value behind the lock is: {}", *lock.read());
}
