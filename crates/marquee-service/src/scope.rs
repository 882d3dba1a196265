//! Traced operation scopes.
//!
//! A [`ScopeProvider`] opens a [`Scope`] per store operation. Callers hold the
//! scope through a [`ScopeGuard`], which ends it when dropped, so the scope is
//! closed on every exit path including early returns and errors.

use std::time::Instant;

use tracing::span::EnteredSpan;

pub trait Scope {
    fn annotate(&mut self, key: &str, value: &str);
    fn end(self);
}

pub trait ScopeProvider: Send + Sync {
    type Scope: Scope;

    fn begin_scope(&self, name: &'static str) -> Self::Scope;
}

pub struct ScopeGuard<S: Scope> {
    scope: Option<S>,
}

impl<S: Scope> ScopeGuard<S> {
    pub fn begin<P>(provider: &P, name: &'static str) -> Self
    where
        P: ScopeProvider<Scope = S>,
    {
        Self {
            scope: Some(provider.begin_scope(name)),
        }
    }

    pub fn annotate(&mut self, key: &str, value: &str) {
        if let Some(scope) = self.scope.as_mut() {
            scope.annotate(key, value);
        }
    }
}

impl<S: Scope> Drop for ScopeGuard<S> {
    fn drop(&mut self) {
        if let Some(scope) = self.scope.take() {
            scope.end();
        }
    }
}

/// Scopes backed by `tracing` spans. Annotations become events inside the span.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingScopes;

pub struct TracingScope {
    span: EnteredSpan,
    started: Instant,
}

impl ScopeProvider for TracingScopes {
    type Scope = TracingScope;

    fn begin_scope(&self, name: &'static str) -> TracingScope {
        TracingScope {
            span: tracing::info_span!("operation", name).entered(),
            started: Instant::now(),
        }
    }
}

impl Scope for TracingScope {
    fn annotate(&mut self, key: &str, value: &str) {
        tracing::info!(key, value, "annotation");
    }

    fn end(self) {
        let elapsed = self.started.elapsed();
        tracing::debug!(?elapsed, "operation scope closed");
        drop(self.span.exit());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default, Clone)]
    struct Log(Arc<Mutex<Vec<String>>>);

    struct LogScope {
        name: &'static str,
        log: Log,
    }

    impl ScopeProvider for Log {
        type Scope = LogScope;

        fn begin_scope(&self, name: &'static str) -> LogScope {
            self.0.lock().unwrap().push(format!("begin {name}"));
            LogScope {
                name,
                log: self.clone(),
            }
        }
    }

    impl Scope for LogScope {
        fn annotate(&mut self, key: &str, value: &str) {
            self.log.0.lock().unwrap().push(format!("{key}={value}"));
        }

        fn end(self) {
            self.log.0.lock().unwrap().push(format!("end {}", self.name));
        }
    }

    fn fallible(log: &Log, fail: bool) -> Result<(), &'static str> {
        let mut scope = ScopeGuard::begin(log, "op");
        scope.annotate("value", "k");
        if fail {
            return Err("boom");
        }
        scope.annotate("ok", "true");
        Ok(())
    }

    #[test]
    fn guard_ends_scope_on_success() {
        let log = Log::default();
        fallible(&log, false).unwrap();
        assert_eq!(
            *log.0.lock().unwrap(),
            vec!["begin op", "value=k", "ok=true", "end op"]
        );
    }

    #[test]
    fn guard_ends_scope_on_early_error() {
        let log = Log::default();
        assert!(fallible(&log, true).is_err());
        assert_eq!(*log.0.lock().unwrap(), vec!["begin op", "value=k", "end op"]);
    }

    #[test]
    fn guard_ends_scope_on_panic() {
        let log = Log::default();
        let inner = log.clone();
        let result = std::panic::catch_unwind(move || {
            let _scope = ScopeGuard::begin(&inner, "op");
            panic!("store exploded");
        });
        assert!(result.is_err());
        assert_eq!(*log.0.lock().unwrap(), vec!["begin op", "end op"]);
    }

    #[test]
    fn tracing_scope_runs_without_subscriber() {
        let mut scope = ScopeGuard::begin(&TracingScopes, "get-titles-from-person");
        scope.annotate("value", "nm0000428");
    }
}
