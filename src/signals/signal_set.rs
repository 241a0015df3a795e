//! Signal identifiers and signal lists
//!
//! Registration, disconnection and clearing accept either a single signal or
//! an ordered collection of signals.

use std::fmt;
use std::hash::Hash;

/// Anything usable as a signal identifier
pub trait SignalId: Eq + Hash + Clone + fmt::Debug {}

impl<T> SignalId for T where T: Eq + Hash + Clone + fmt::Debug {}

/// Conversion into an ordered list of signal identifiers
pub trait IntoSignals<S> {
    fn into_signals(self) -> Vec<S>;
}

impl<S> IntoSignals<S> for Vec<S> {
    fn into_signals(self) -> Vec<S> {
        self
    }
}

impl<S, const N: usize> IntoSignals<S> for [S; N] {
    fn into_signals(self) -> Vec<S> {
        Vec::from(self)
    }
}

impl<S: Clone> IntoSignals<S> for &[S] {
    fn into_signals(self) -> Vec<S> {
        self.to_vec()
    }
}

impl<S: Clone> IntoSignals<S> for &Vec<S> {
    fn into_signals(self) -> Vec<S> {
        self.clone()
    }
}

impl IntoSignals<String> for &str {
    fn into_signals(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl IntoSignals<String> for String {
    fn into_signals(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoSignals<String> for &String {
    fn into_signals(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<'a> IntoSignals<String> for Vec<&'a str> {
    fn into_signals(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}

impl<'a> IntoSignals<String> for &[&'a str] {
    fn into_signals(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_owned()).collect()
    }
}

impl<'a, const N: usize> IntoSignals<String> for [&'a str; N] {
    fn into_signals(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_owned()).collect()
    }
}
