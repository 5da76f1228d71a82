use parking_lot::{Condvar, Mutex};

/// Binary semaphore that parks waiting threads instead of spinning
///
/// # Description
///
/// Unlike a mutex guard, a permit taken by one thread may be handed back by
/// another one. The reader side of `RwLock` depends on that: the first reader
/// takes the permit and whichever reader happens to leave last returns it.
pub struct BinarySemaphore
{
    held: Mutex<bool>,
    released: Condvar,
}

impl BinarySemaphore
{
    pub fn new() -> BinarySemaphore
    {
        BinarySemaphore {
            held: Mutex::new(false),
            released: Condvar::new(),
        }
    }

    /// Blocks until the permit is free, then takes it.
    pub fn acquire(&self) {
        let mut held = self.held.lock();

        while *held {
            self.released.wait(&mut held);
        }

        *held = true;
    }

    /// Takes the permit only if nobody holds it.
    pub fn try_acquire(&self) -> bool {
        let mut held = self.held.lock();

        if *held {
            false
        } else {
            *held = true;
            true
        }
    }

    /// Returns the permit and wakes one waiter.
    pub fn release(&self) {
        {
            let mut held = self.held.lock();
            debug_assert!(*held, "released a semaphore nobody acquired");
            *held = false;
        }

        self.released.notify_one();
    }

    pub fn is_held(&self) -> bool {
        *self.held.lock()
    }
}

impl Default for BinarySemaphore
{
    fn default() -> BinarySemaphore {
        BinarySemaphore::new()
    }
}
