use log::Level;
use serde_json::{Map, Value};

pub fn log_event(level: Level, event: &str, fields: Value) {
    if !log::log_enabled!(level) {
        return;
    }

    log::log!(level, "{}", event_payload(event, fields));
}

fn event_payload(event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload)
}
