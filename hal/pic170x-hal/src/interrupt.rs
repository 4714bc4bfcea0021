//! Global interrupt-enable flag and critical sections
//!
//! The target has one core, one interrupt priority level and one global
//! interrupt-enable bit. That bit is the only synchronization primitive:
//! background code that touches state shared with the interrupt handler
//! clears it for the duration of the access and then puts it back the way
//! it found it.
//!
//! [`with_critical_section`] enforces that discipline. It runs inside a
//! `critical_section::with` section (GIE-backed on the chip, a global lock
//! in host tests) and additionally saves and clears the given
//! [`InterruptControl`] flag. The previous flag value is restored by a
//! guard, so every exit path (including unwinding in host tests) releases
//! the section, and nested sections never re-enable interrupts early.
//!
//! [`Mutex`] is built on `critical_section::Mutex`, so it is `Sync` and
//! shared state can live in a `static` that the interrupt vector reaches.

use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

/// Access to the global interrupt-enable flag
pub trait InterruptControl {
    /// Check if interrupts are currently enabled
    fn interrupts_enabled(&self) -> bool;

    /// Enable or disable interrupts globally
    fn set_interrupts_enabled(&self, enabled: bool);

    /// Disable interrupts, returning the previous flag value
    fn disable(&self) -> bool {
        let was_enabled = self.interrupts_enabled();
        self.set_interrupts_enabled(false);
        was_enabled
    }

    /// Restore a flag value returned by [`InterruptControl::disable`]
    fn restore(&self, was_enabled: bool) {
        if was_enabled {
            self.set_interrupts_enabled(true);
        }
    }
}

impl<T: InterruptControl + ?Sized> InterruptControl for &T {
    fn interrupts_enabled(&self) -> bool {
        (**self).interrupts_enabled()
    }

    fn set_interrupts_enabled(&self, enabled: bool) {
        (**self).set_interrupts_enabled(enabled)
    }
}

/// Token proving interrupts are disabled
///
/// Only [`with_critical_section`] hands these out, and only for the
/// lifetime of the closure it runs.
#[derive(Debug, Clone, Copy)]
pub struct CriticalSection<'cs> {
    token: critical_section::CriticalSection<'cs>,
}

impl<'cs> CriticalSection<'cs> {
    /// The underlying `critical-section` token, for crates built on it
    pub fn token(&self) -> critical_section::CriticalSection<'cs> {
        self.token
    }
}

/// Restores the interrupt flag when dropped
struct RestoreGuard<'a, I: InterruptControl + ?Sized> {
    irq: &'a I,
    was_enabled: bool,
}

impl<I: InterruptControl + ?Sized> Drop for RestoreGuard<'_, I> {
    fn drop(&mut self) {
        self.irq.restore(self.was_enabled);
    }
}

/// Run `f` with interrupts disabled
///
/// The interrupt flag is saved on entry and restored to that saved value
/// on exit. If the caller was already inside a critical section, interrupts
/// stay disabled afterwards.
pub fn with_critical_section<I, F, R>(irq: &I, f: F) -> R
where
    I: InterruptControl + ?Sized,
    F: FnOnce(&CriticalSection<'_>) -> R,
{
    critical_section::with(|token| {
        let _guard = RestoreGuard {
            irq,
            was_enabled: irq.disable(),
        };
        f(&CriticalSection { token })
    })
}

/// State shared between the background and interrupt contexts
///
/// The inner value can only be reached while holding a [`CriticalSection`]
/// token, which makes the "disable interrupts around every access" rule a
/// compile-time requirement rather than a convention.
///
/// `Mutex<T>` is `Sync` when `T: Send`:
///
/// ```
/// use pic170x_hal::Mutex;
///
/// static TICKS: Mutex<u32> = Mutex::new(0);
/// ```
pub struct Mutex<T> {
    inner: critical_section::Mutex<RefCell<T>>,
}

impl<T> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutex").finish_non_exhaustive()
    }
}

impl<T: Default> Default for Mutex<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Mutex<T> {
    /// Wrap a value
    pub const fn new(value: T) -> Self {
        Self {
            inner: critical_section::Mutex::new(RefCell::new(value)),
        }
    }

    /// Borrow the value immutably inside a critical section
    pub fn borrow<'cs>(&'cs self, cs: &'cs CriticalSection<'_>) -> Ref<'cs, T> {
        self.inner.borrow_ref(cs.token)
    }

    /// Borrow the value mutably inside a critical section
    ///
    /// # Panics
    ///
    /// Panics if the value is already borrowed, which can only happen when
    /// an event handler re-enters state it is already servicing.
    pub fn borrow_mut<'cs>(&'cs self, cs: &'cs CriticalSection<'_>) -> RefMut<'cs, T> {
        self.inner.borrow_ref_mut(cs.token)
    }

    /// Enter a critical section and access the value immutably
    pub fn with<I, F, R>(&self, irq: &I, f: F) -> R
    where
        I: InterruptControl + ?Sized,
        F: FnOnce(&T) -> R,
    {
        with_critical_section(irq, |cs| f(&self.borrow(cs)))
    }

    /// Enter a critical section and access the value mutably
    pub fn with_mut<I, F, R>(&self, irq: &I, f: F) -> R
    where
        I: InterruptControl + ?Sized,
        F: FnOnce(&mut T) -> R,
    {
        with_critical_section(irq, |cs| f(&mut self.borrow_mut(cs)))
    }

    /// Consume the mutex, returning the value
    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}
