use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use rand::rngs::ThreadRng;

use super::{IDENTITY_DELIMITER, PaneId};

const TOKEN_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Supplies the unique suffix of new pane identities.
pub trait TokenSource {
    fn next_token(&mut self) -> String;
}

/// Six random base-36 characters per token.
pub struct RandomTokens<R = ThreadRng> {
    rng: R,
}

impl RandomTokens<ThreadRng> {
    pub fn new() -> Self { Self { rng: rand::thread_rng() } }
}

impl Default for RandomTokens<ThreadRng> {
    fn default() -> Self { Self::new() }
}

impl<R: Rng> RandomTokens<R> {
    pub fn with_rng(rng: R) -> Self { Self { rng } }
}

impl<R: Rng> TokenSource for RandomTokens<R> {
    fn next_token(&mut self) -> String {
        (0..TOKEN_LEN)
            .map(|_| char::from(BASE36[self.rng.gen_range(0..BASE36.len())]))
            .collect()
    }
}

/// Deterministic tokens: the scripted ones first, then `000001`, `000002`, ...
#[derive(Debug, Default)]
pub struct SequenceTokens {
    scripted: VecDeque<String>,
    counter: u64,
}

impl SequenceTokens {
    pub fn new() -> Self { Self::default() }

    pub fn scripted<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            scripted: tokens.into_iter().map(Into::into).collect(),
            counter: 0,
        }
    }
}

impl TokenSource for SequenceTokens {
    fn next_token(&mut self) -> String {
        if let Some(token) = self.scripted.pop_front() {
            return token;
        }
        self.counter += 1;
        format!("{:0width$}", self.counter, width = TOKEN_LEN)
    }
}

/// Turns widget-type names into fresh pane identities.
pub struct IdentityGenerator {
    tokens: Box<dyn TokenSource>,
}

impl IdentityGenerator {
    pub fn new(tokens: impl TokenSource + 'static) -> Self { Self { tokens: Box::new(tokens) } }

    pub fn random() -> Self { Self::new(RandomTokens::new()) }

    pub fn sequential() -> Self { Self::new(SequenceTokens::new()) }

    pub fn new_identity(&mut self, widget_type: &str) -> PaneId {
        let token = self.tokens.next_token();
        PaneId::new(format!("{widget_type}{IDENTITY_DELIMITER}{token}"))
    }
}

impl Default for IdentityGenerator {
    fn default() -> Self { Self::random() }
}

impl fmt::Debug for IdentityGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityGenerator").finish_non_exhaustive()
    }
}
