use std::path::Path;

use json::JsonValue;
use tracing::{debug, warn};

use crate::{
    error::{LoadError, NetworkError},
    simulation::{ElementKey, Kind, Network, Position},
};

pub fn load(path: impl AsRef<Path>) -> Result<Network, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), "loading circuit");
    from_json(&text)
}

/// Builds a network from the text of a save file.
///
/// Connections to names that are not in the file are dropped instead of failing the load.
pub fn from_json(text: &str) -> Result<Network, LoadError> {
    let JsonValue::Array(records) = json::parse(text)? else {
        return Err(malformed("toplevel json must be array"));
    };

    let mut network = Network::new();
    let mut pending = Vec::with_capacity(records.len());

    // every element has to exist before any connection can be resolved
    for record in records {
        let (key, connections) = parse_element(&mut network, record)?;
        pending.push((key, connections));
    }

    for (key, connections) in pending {
        resolve_connections(&mut network, key, &connections)?;
    }

    debug!(elements = network.len(), "loaded circuit");
    Ok(network)
}

fn parse_element(network: &mut Network, record: JsonValue) -> Result<(ElementKey, Vec<JsonValue>), LoadError> {
    let JsonValue::Object(mut record) = record else { return Err(malformed("element must be object")) };
    let name = record.remove("n").ok_or_else(|| malformed("element must have field 'n'"))?.take_string().ok_or_else(|| malformed("element name must be string"))?;
    let kind: Kind = record.remove("t").ok_or_else(|| malformed(format!("element '{name}' must have field 't'")))?.as_str().ok_or_else(|| malformed(format!("kind of '{name}' must be string")))?.parse()?;
    let x = record.remove("x").ok_or_else(|| malformed(format!("element '{name}' must have field 'x'")))?.as_f64().ok_or_else(|| malformed(format!("x of '{name}' must be number")))?;
    let y = record.remove("y").ok_or_else(|| malformed(format!("element '{name}' must have field 'y'")))?.as_f64().ok_or_else(|| malformed(format!("y of '{name}' must be number")))?;
    let JsonValue::Array(connections) = record.remove("c").ok_or_else(|| malformed(format!("element '{name}' must have field 'c'")))? else {
        return Err(malformed(format!("connections of '{name}' must be array")));
    };

    let key = network.add_named(kind, name, Position { x, y })?;
    Ok((key, connections))
}

fn resolve_connections(network: &mut Network, key: ElementKey, connections: &[JsonValue]) -> Result<(), LoadError> {
    let (name, arity) = network.get(key).map(|element| (element.name().to_string(), element.inputs().len())).ok_or(NetworkError::UnknownElement(key))?;
    if connections.len() > arity {
        warn!(%name, arity, listed = connections.len(), "ignoring connections beyond the number of inputs");
    }

    for (slot, source) in connections.iter().enumerate().take(arity) {
        if source.is_null() {
            continue;
        }
        match source.as_str().and_then(|source| network.key_of(source)) {
            Some(source) => network.connect(key, slot, source)?,
            None => warn!(%name, slot, %source, "connection to unknown element left unconnected"),
        }
    }
    Ok(())
}

fn malformed(message: impl Into<String>) -> LoadError {
    LoadError::Malformed(message.into())
}

#[cfg(test)]
mod test {
    use super::from_json;
    use crate::{
        error::{LoadError, NetworkError, ParseKindError},
        simulation::{logic, Kind, Position},
    };

    const HALF_ADDER: &str = r#"[
        {"n": "A", "t": "SW", "x": 40, "y": 60, "c": []},
        {"n": "B", "t": "SW", "x": 40, "y": 160, "c": []},
        {"n": "SUM", "t": "LED", "x": 400, "y": 60, "c": ["XOR_1"]},
        {"n": "CARRY", "t": "LED", "x": 400, "y": 160, "c": ["AND_2"]},
        {"n": "XOR_1", "t": "XOR", "x": 200, "y": 60, "c": ["A", "B"]},
        {"n": "AND_2", "t": "AND", "x": 200, "y": 160, "c": ["A", "B"]}
    ]"#;

    #[test]
    fn loads_forward_references() {
        let mut network = from_json(HALF_ADDER).unwrap();
        assert_eq!(network.len(), 6);

        let a = network.key_of("A").unwrap();
        let b = network.key_of("B").unwrap();
        let xor = network.key_of("XOR_1").unwrap();
        let sum = network.key_of("SUM").unwrap();
        assert_eq!(network.get(xor).unwrap().inputs(), &[Some(a), Some(b)]);
        assert_eq!(network.get(sum).unwrap().inputs(), &[Some(xor)]);
        assert_eq!(network.get(a).unwrap().position, Position { x: 40.0, y: 60.0 });
        assert_eq!(network.switches(), vec![a, b]);

        network.set_switch(a, true).unwrap();
        logic::relax(&mut network, logic::LIVE_PASSES);
        assert_eq!(network.output(sum), Some(true));
    }

    #[test]
    fn unknown_kind_fails() {
        let error = from_json(r#"[{"n": "M", "t": "MUX", "x": 0, "y": 0, "c": []}]"#).unwrap_err();
        assert!(matches!(error, LoadError::UnknownKind(ParseKindError(ref tag)) if tag == "MUX"));
        assert_eq!(error.to_string(), "unknown element kind 'MUX'");
    }

    #[test]
    fn unresolved_connections_are_dropped() {
        let network = from_json(r#"[{"n": "G", "t": "AND", "x": 0, "y": 0, "c": ["nowhere", 7]}, {"n": "L", "t": "LED", "x": 0, "y": 0, "c": ["G", "G", "G"]}]"#).unwrap();
        let g = network.key_of("G").unwrap();
        assert_eq!(network.get(g).unwrap().inputs(), &[None, None]);
        assert_eq!(network.get(network.key_of("L").unwrap()).unwrap().inputs(), &[Some(g)]);
    }

    #[test]
    fn short_connection_lists() {
        let network = from_json(r#"[{"n": "N", "t": "NAND", "x": 0, "y": 0, "c": ["N"]}]"#).unwrap();
        let n = network.key_of("N").unwrap();
        assert_eq!(network.get(n).unwrap().inputs(), &[Some(n), None]);
    }

    #[test]
    fn switch_alias() {
        let network = from_json(r#"[{"n": "S", "t": "SWITCH", "x": 0, "y": 0, "c": []}]"#).unwrap();
        assert_eq!(network.get(network.key_of("S").unwrap()).unwrap().kind(), Kind::SWITCH);
    }

    #[test]
    fn malformed_files() {
        assert!(matches!(from_json("{}"), Err(LoadError::Malformed(_))));
        assert!(matches!(from_json("[1]"), Err(LoadError::Malformed(_))));
        assert!(matches!(from_json(r#"[{"n": "A", "t": "SW", "x": "left", "y": 0, "c": []}]"#), Err(LoadError::Malformed(_))));
        assert!(matches!(from_json(r#"[{"n": "A", "t": "SW", "x": 0, "y": 0}]"#), Err(LoadError::Malformed(_))));
        assert!(matches!(from_json("[{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn duplicate_names_fail() {
        let error = from_json(r#"[{"n": "A", "t": "SW", "x": 0, "y": 0, "c": []}, {"n": "A", "t": "LED", "x": 0, "y": 0, "c": [null]}]"#).unwrap_err();
        assert!(matches!(error, LoadError::Network(NetworkError::DuplicateName(ref name)) if name == "A"));
    }
}
