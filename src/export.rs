use std::path::Path;

use json::{object::Object, JsonValue};
use tracing::debug;

use crate::simulation::Network;

/// One record per element in insertion order: name, kind tag, position and the name feeding each slot.
pub fn to_json(network: &Network) -> JsonValue {
    JsonValue::Array(
        network
            .iter()
            .map(|(_, element)| {
                let connections = element.inputs().iter().map(|source| source.and_then(|source| network.get(source)).map_or(JsonValue::Null, |source| source.name().into())).collect();

                let mut record = Object::with_capacity(5);
                record.insert("n", element.name().into());
                record.insert("t", element.kind().tag().into());
                record.insert("x", element.position.x.into());
                record.insert("y", element.position.y.into());
                record.insert("c", JsonValue::Array(connections));
                JsonValue::Object(record)
            })
            .collect(),
    )
}

pub fn save(network: &Network, path: impl AsRef<Path>) -> std::io::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json(network).dump())?;
    debug!(path = %path.display(), elements = network.len(), "saved circuit");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{save, to_json};
    use crate::{
        import::{from_json, load},
        simulation::{Kind, Network, Position},
    };

    #[test]
    fn record_layout() {
        let mut network = Network::new();
        let sw = network.add_named(Kind::SWITCH, "in", Position { x: 10.0, y: 20.5 }).unwrap();
        let and = network.add_named(Kind::AND, "gate", Position::default()).unwrap();
        network.connect(and, 1, sw).unwrap();

        let records = to_json(&network);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["n"], "in");
        assert_eq!(records[0]["t"], "SW");
        assert_eq!(records[0]["x"].as_f64(), Some(10.0));
        assert_eq!(records[0]["y"].as_f64(), Some(20.5));
        assert!(records[0]["c"].is_array() && records[0]["c"].is_empty());
        assert_eq!(records[1]["t"], "AND");
        assert!(records[1]["c"][0].is_null());
        assert_eq!(records[1]["c"][1], "in");
        assert_eq!(records[1]["x"].as_f64(), Some(150.0));
    }

    #[test]
    fn reload_keeps_structure() {
        let mut network = Network::new();
        let a = network.add_element(Kind::SWITCH);
        let node = network.add_element(Kind::NODE);
        let not = network.add_element(Kind::NOT);
        let led = network.add_element(Kind::LED);
        network.connect(node, 0, not).unwrap();
        network.connect(not, 0, node).unwrap();
        network.connect(led, 0, a).unwrap();
        network.set_position(led, Position { x: -3.0, y: 7.25 }).unwrap();

        let reloaded = from_json(&to_json(&network).dump()).unwrap();
        let names = |network: &Network| network.iter().map(|(_, element)| (element.name().to_string(), element.kind(), element.position, element.inputs().iter().map(|source| source.map(|source| network.get(source).unwrap().name().to_string())).collect::<Vec<_>>())).collect::<Vec<_>>();
        assert_eq!(names(&network), names(&reloaded));
    }

    #[test]
    fn save_then_load() {
        let mut network = Network::new();
        let sw = network.add_element(Kind::SWITCH);
        let led = network.add_element(Kind::LED);
        network.connect(led, 0, sw).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("circuit.json");
        save(&network, &path).unwrap();

        let loaded = load(&path).unwrap();
        let led = loaded.key_of(network.get(led).unwrap().name()).unwrap();
        assert_eq!(loaded.sources_of(led), Some(&[loaded.key_of(network.get(sw).unwrap().name())][..]));
    }
}
