use rtrb::{Consumer, Producer, RingBuffer};

/// Forwards rendered samples from the audio callback to a display thread.
///
/// Pushing never blocks: when the ring is full the sample is dropped, which
/// only costs the scope a few points.
pub struct ScopeTap {
    tx: Producer<f32>,
}

impl ScopeTap {
    /// Create a tap and the consumer end the display polls.
    pub fn new(capacity: usize) -> (Self, Consumer<f32>) {
        let (tx, rx) = RingBuffer::<f32>::new(capacity);
        (Self { tx }, rx)
    }

    pub fn push_slice(&mut self, samples: &[f32]) {
        for &s in samples {
            if self.tx.push(s).is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_samples_when_full() {
        let (mut tap, mut rx) = ScopeTap::new(4);
        tap.push_slice(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let mut seen = Vec::new();
        while let Ok(s) = rx.pop() {
            seen.push(s);
        }
        assert_eq!(seen, vec![0.1, 0.2, 0.3, 0.4]);
    }
}
