use core::cell::UnsafeCell;
use core::fmt;
use core::ops::{Deref, DerefMut, Drop};
use core::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::semaphore::BinarySemaphore;

/// Provides multiple-reader single-writer lock based on a reader counter and a binary semaphore
///
/// # Description
///
/// `readers` is the counter guard: it serialises updates of the number of
/// readers currently inside. `resource` is the semaphore that grants either
/// exclusive access to one writer or shared access to the whole group of
/// readers.
///
/// Only the reader entering on a count of 0 and the reader leaving on a count
/// of 1 touch `resource`, every other reader just bumps the counter. As a
/// consequence the lock prefers readers: as long as readers keep overlapping,
/// the count never returns to 0 and a waiting writer can starve.
///
/// Every blocking point parks the thread, nothing here spins.
pub struct RwLock<T: ?Sized>
{
    readers: Mutex<usize>,
    resource: BinarySemaphore,
    holders: AtomicUsize,
    data: UnsafeCell<T>,
}

pub struct ReadLockGuard<'a, T: ?Sized + 'a>
{
    lock: &'a RwLock<T>,
    data: &'a T,
}

pub struct WriteLockGuard<'a, T: ?Sized + 'a>
{
    lock: &'a RwLock<T>,
    data: &'a mut T,
}

unsafe impl<T: ?Sized + Send + Sync> Sync for RwLock<T> {}

unsafe impl<T: ?Sized + Send> Send for RwLock<T> {}

impl<T> RwLock<T>
{
    pub fn new(user_data: T) -> RwLock<T>
    {
        RwLock {
            readers: Mutex::new(0),
            resource: BinarySemaphore::new(),
            holders: AtomicUsize::new(0),
            data: UnsafeCell::new(user_data),
        }
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: ?Sized> RwLock<T>
{
    fn obtain_reader_lock(&self) {
        let mut readers = self.readers.lock();
        *readers += 1;

        // First reader locks writers out on behalf of the whole group. Later
        // readers queue on `readers` behind it while it waits.
        if *readers == 1 {
            self.resource.acquire();
        }

        self.holders.fetch_add(1, Ordering::SeqCst);
    }

    fn release_reader(&self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);

        let mut readers = self.readers.lock();
        *readers -= 1;

        if *readers == 0 {
            self.resource.release();
        }
    }

    fn obtain_writer_lock(&self) {
        self.resource.acquire();
    }

    fn release_writer(&self) {
        self.resource.release();
    }

    fn obtained_read(&self) -> ReadLockGuard<'_, T> {
        ReadLockGuard {
            lock: self,
            // SAFETY: the caller is registered as a reader, so no writer holds `resource`.
            data: unsafe { &*self.data.get() },
        }
    }

    fn obtained_write(&self) -> WriteLockGuard<'_, T> {
        WriteLockGuard {
            lock: self,
            // SAFETY: the caller holds `resource` exclusively and the reader count is 0.
            data: unsafe { &mut *self.data.get() },
        }
    }

    /// Obtain the lock in read mode
    ///
    /// Blocks only when this is the first reader and a writer is inside.
    pub fn read(&self) -> ReadLockGuard<'_, T>
    {
        self.obtain_reader_lock();
        self.obtained_read()
    }

    /// Obtain the lock in write mode
    ///
    /// Blocks until neither readers nor another writer are inside.
    pub fn write(&self) -> WriteLockGuard<'_, T>
    {
        self.obtain_writer_lock();
        self.obtained_write()
    }

    /// Attempts to obtain the lock in read mode without parking
    ///
    /// Fails when a writer is inside, and also when the counter guard is busy
    /// (e.g. a first reader is queued behind a writer).
    pub fn try_read(&self) -> Option<ReadLockGuard<'_, T>> {
        let mut readers = self.readers.try_lock()?;

        if *readers == 0 && !self.resource.try_acquire() {
            return None;
        }

        *readers += 1;
        self.holders.fetch_add(1, Ordering::SeqCst);
        drop(readers);

        Some(self.obtained_read())
    }

    /// Attempts to obtain the lock in write mode without parking
    pub fn try_write(&self) -> Option<WriteLockGuard<'_, T>> {
        if self.resource.try_acquire() {
            Some(self.obtained_write())
        } else {
            None
        }
    }

    /// Number of readers currently holding a read guard
    ///
    /// Never waits on the counter guard, and a first reader still queued
    /// behind a writer is not counted.
    pub fn reader_count(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

impl<T: Default> Default for RwLock<T>
{
    fn default() -> RwLock<T> {
        RwLock::new(T::default())
    }
}

impl<T: ?Sized> fmt::Debug for RwLock<T>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("RwLock");
        match self.readers.try_lock() {
            Some(readers) => d.field("readers", &*readers),
            None => d.field("readers", &format_args!("<locked>")),
        };
        d.field("resource_held", &self.resource.is_held()).finish_non_exhaustive()
    }
}

macro_rules! define_deref_for {
    ($cls:ty) => (
        impl<'a, T: ?Sized> Deref for $cls
        {
            type Target = T;
            fn deref(&self) -> &T { &*self.data }
        }
    )
}

macro_rules! define_deref_mut_for {
    ($cls:ty) => (
        impl<'a, T: ?Sized> DerefMut for $cls
        {
            fn deref_mut(&mut self) -> &mut T {
                &mut *self.data
            }
        }
    )
}

macro_rules! define_drop_for {
    ($cls:ty, $release:ident) => (
        impl<'a, T: ?Sized> Drop for $cls
        {
            fn drop(&mut self)
            {
                self.lock.$release();
            }
        }
    )
}

define_deref_for!(ReadLockGuard<'a, T>);
define_deref_for!(WriteLockGuard<'a, T>);
define_deref_mut_for!(WriteLockGuard<'a, T>);
define_drop_for!(ReadLockGuard<'a, T>, release_reader);
define_drop_for!(WriteLockGuard<'a, T>, release_writer);
