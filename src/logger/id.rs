use rand::Rng;

/// Length of the correlation id every facade generates at construction.
pub const CORRELATION_ID_LENGTH: usize = 8;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

pub trait IdGenerator {
    fn generate(&self, length: usize) -> String;
}

/// URL-safe random ids drawn from a 64-symbol alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::rng();
        (0..length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl<F> IdGenerator for F
where
    F: Fn(usize) -> String,
{
    fn generate(&self, length: usize) -> String {
        self(length)
    }
}
