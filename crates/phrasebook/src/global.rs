//! Shared engine for the `global` feature.
//!
//! Provides a module-level translation API over one process-wide engine,
//! removing the need to pass an `&mut Engine` to every call site. Every
//! call holds the engine's lock for its whole duration, so seeding is never
//! interleaved between threads.

use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use phrasebook_format::Value;

use crate::config::EngineConfig;
use crate::engine::Engine;

static GLOBAL_ENGINE: LazyLock<Mutex<Engine>> = LazyLock::new(|| Mutex::new(Engine::new()));

/// Locks the engine, ignoring poisoning: a panicking call never leaves a
/// half-written tree behind.
fn lock() -> MutexGuard<'static, Engine> {
    GLOBAL_ENGINE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Provides read access to the global engine.
pub fn with_engine<T>(f: impl FnOnce(&Engine) -> T) -> T {
    let guard = lock();
    f(&guard)
}

/// Provides write access to the global engine.
pub fn with_engine_mut<T>(f: impl FnOnce(&mut Engine) -> T) -> T {
    let mut guard = lock();
    f(&mut guard)
}

/// Applies configuration to the global engine.
pub fn configure(config: EngineConfig) {
    with_engine_mut(|engine| engine.configure(config));
}

/// Translates a phrase into the default locale.
pub fn t(phrase: &str) -> String {
    with_engine_mut(|engine| engine.t(phrase))
}

/// Translates a singular/plural pair with a count into the default locale.
pub fn tn(singular: &str, plural: &str, count: impl Into<Value>) -> String {
    with_engine_mut(|engine| engine.tn(singular, plural, count))
}

/// Sets the default locale, returning the default locale after the call.
pub fn set_locale(locale: &str) -> String {
    with_engine_mut(|engine| engine.set_locale(locale).to_owned())
}

/// Returns the default locale.
pub fn locale() -> String {
    with_engine(|engine| engine.locale().to_owned())
}
