//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Recorded interactions for one port/method pair, with a consumed flag each.
#[derive(Debug, Default)]
struct Queue {
    interactions: Vec<Interaction>,
    consumed: Vec<bool>,
}

/// Replays interactions from a loaded cassette.
///
/// Sub-requests are dispatched concurrently, so the order calls reach the
/// replayer is not the order they were recorded in. An interaction whose
/// recorded input equals the incoming request is preferred; otherwise the
/// oldest unconsumed interaction for the port/method pair is served.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Queue>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Queue> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            let queue = queues.entry(key).or_default();
            queue.interactions.push(interaction.clone());
            queue.consumed.push(false);
        }
        Self { queues }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette has no (more) interactions for the
    /// given port/method combination.
    pub fn next_interaction(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Result<&Interaction, String> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        if !self.queues.contains_key(&key) {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(format!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            ));
        }
        let queue = self.queues.get_mut(&key).ok_or("cassette queue vanished")?;

        let interactions = &queue.interactions;
        let consumed = &queue.consumed;
        let index = (0..interactions.len())
            .find(|&i| !consumed[i] && interactions[i].input == *input)
            .or_else(|| (0..interactions.len()).find(|&i| !consumed[i]))
            .ok_or_else(|| {
                format!(
                    "Cassette exhausted: all {count} interactions for port={port:?} \
                     method={method:?} have been consumed.",
                    count = interactions.len(),
                )
            })?;

        queue.consumed[index] = true;
        Ok(&queue.interactions[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        }
    }

    fn completion(seq: u64, input: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: "language_model".into(),
            method: "complete".into(),
            input,
            output: json!({"Ok": {"text": format!("reply {seq}")}}),
        }
    }

    #[test]
    fn replay_in_order_when_inputs_differ() {
        let cassette = make_cassette(vec![
            completion(0, json!({"prompt": "first"})),
            completion(1, json!({"prompt": "second"})),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);
        let other = json!({"prompt": "neither"});

        let i1 = replayer.next_interaction("language_model", "complete", &other).unwrap();
        assert_eq!(i1.seq, 0);

        let i2 = replayer.next_interaction("language_model", "complete", &other).unwrap();
        assert_eq!(i2.seq, 1);
    }

    #[test]
    fn matching_input_wins_over_order() {
        let cassette = make_cassette(vec![
            completion(0, json!({"prompt": "explain"})),
            completion(1, json!({"prompt": "pronounce"})),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);

        let first = replayer
            .next_interaction("language_model", "complete", &json!({"prompt": "pronounce"}))
            .unwrap();
        assert_eq!(first.seq, 1);

        let second = replayer
            .next_interaction("language_model", "complete", &json!({"prompt": "explain"}))
            .unwrap();
        assert_eq!(second.seq, 0);
    }

    #[test]
    fn exhausted_replayer_errors() {
        let cassette = make_cassette(vec![completion(0, json!({}))]);

        let mut replayer = CassetteReplayer::new(&cassette);
        assert!(replayer.next_interaction("language_model", "complete", &json!({})).is_ok());
        let err = replayer.next_interaction("language_model", "complete", &json!({})).unwrap_err();
        assert!(err.contains("Cassette exhausted"));
    }

    #[test]
    fn unknown_port_errors() {
        let cassette = make_cassette(vec![]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let err = replayer.next_interaction("unknown", "method", &json!({})).unwrap_err();
        assert!(err.contains("no interactions recorded"));
    }
}
