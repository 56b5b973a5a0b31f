use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::{
    error::NetworkError,
    simulation::{
        element::{Element, Kind, Position},
        order::ElementOrder,
        ElementKey, ElementMap,
    },
};

/// The elements of a circuit and the connections between them.
///
/// Every slot either is unconnected or refers to an element that is currently in the network; removing an element
/// unhooks every slot it was feeding. Cycles are allowed.
///
/// A `Network` is not synchronized: mutating it while another thread evaluates it requires external locking.
#[derive(Clone, Debug, Default)]
pub struct Network {
    pub(crate) elements: ElementMap,
    pub(crate) order: ElementOrder,
    names: HashMap<String, ElementKey>,
    // every name this network has ever handed out so that none is reused after deletion
    issued: HashSet<String>,
    next_name: usize,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    // adding and removing {{{1
    pub fn add_element(&mut self, kind: Kind) -> ElementKey {
        self.add_element_at(kind, Position::default())
    }

    pub fn add_element_at(&mut self, kind: Kind, position: Position) -> ElementKey {
        let name = self.fresh_name(kind);
        self.insert(Element::new(kind, name, position))
    }

    /// Adds an element with a caller-chosen name, as done when loading a save file.
    pub fn add_named(&mut self, kind: Kind, name: impl Into<String>, position: Position) -> Result<ElementKey, NetworkError> {
        let name = name.into();
        if self.issued.contains(&name) {
            return Err(NetworkError::DuplicateName(name));
        }
        Ok(self.insert(Element::new(kind, name, position)))
    }

    fn insert(&mut self, element: Element) -> ElementKey {
        let name = element.name.clone();
        let kind = element.kind();
        let key = self.elements.insert(element);
        self.order.push(key);
        self.issued.insert(name.clone());
        debug!(%name, %kind, "added element");
        self.names.insert(name, key);
        key
    }

    fn fresh_name(&mut self, kind: Kind) -> String {
        loop {
            self.next_name += 1;
            let name = format!("{}_{}", kind.tag(), self.next_name);
            if !self.issued.contains(&name) {
                return name;
            }
        }
    }

    /// Removes an element and disconnects every slot it was feeding.
    pub fn remove_element(&mut self, key: ElementKey) -> Option<Element> {
        let element = self.elements.remove(key)?;
        self.order.remove(key);
        self.names.remove(&element.name);
        let unhooked = self.disconnect_all_sourced_from(key);
        debug!(name = %element.name, unhooked, "removed element");
        Some(element)
    }

    // connections {{{1
    /// Feeds `slot` of `target` from the output of `source`, replacing whatever was connected there before.
    pub fn connect(&mut self, target: ElementKey, slot: usize, source: ElementKey) -> Result<(), NetworkError> {
        if !self.elements.contains_key(source) {
            return Err(NetworkError::UnknownElement(source));
        }
        *self.slot_mut(target, slot)? = Some(source);
        debug!(element = %self.elements[target].name, slot, source = %self.elements[source].name, "connected");
        Ok(())
    }

    /// Clears `slot` of `target`, returning the source that was connected to it.
    pub fn disconnect(&mut self, target: ElementKey, slot: usize) -> Result<Option<ElementKey>, NetworkError> {
        Ok(self.slot_mut(target, slot)?.take())
    }

    /// Clears every slot in the network that is fed by `source`, returning how many were cleared.
    pub fn disconnect_all_sourced_from(&mut self, source: ElementKey) -> usize {
        let mut cleared = 0;
        for (_, element) in self.elements.iter_mut() {
            for slot in element.inputs.iter_mut().filter(|slot| **slot == Some(source)) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    fn slot_mut(&mut self, target: ElementKey, slot: usize) -> Result<&mut Option<ElementKey>, NetworkError> {
        let element = self.elements.get_mut(target).ok_or(NetworkError::UnknownElement(target))?;
        let arity = element.inputs.len();
        match element.inputs.get_mut(slot) {
            Some(slot) => Ok(slot),
            None => Err(NetworkError::SlotOutOfRange { name: element.name.clone(), slot, arity }),
        }
    }

    // switches {{{1
    /// Flips a switch, returning its new value.
    pub fn toggle(&mut self, key: ElementKey) -> Result<bool, NetworkError> {
        let element = self.switch_mut(key)?;
        element.output = !element.output;
        debug!(name = %element.name, value = element.output, "toggled switch");
        Ok(element.output)
    }

    pub fn set_switch(&mut self, key: ElementKey, value: bool) -> Result<(), NetworkError> {
        self.switch_mut(key)?.output = value;
        Ok(())
    }

    fn switch_mut(&mut self, key: ElementKey) -> Result<&mut Element, NetworkError> {
        let element = self.elements.get_mut(key).ok_or(NetworkError::UnknownElement(key))?;
        if !element.kind().is_manual() {
            return Err(NetworkError::NotASwitch(element.name.clone()));
        }
        Ok(element)
    }

    pub fn set_position(&mut self, key: ElementKey, position: Position) -> Result<(), NetworkError> {
        self.elements.get_mut(key).ok_or(NetworkError::UnknownElement(key))?.position = position;
        Ok(())
    }

    // queries {{{1
    pub fn get(&self, key: ElementKey) -> Option<&Element> {
        self.elements.get(key)
    }

    pub fn contains(&self, key: ElementKey) -> bool {
        self.elements.contains_key(key)
    }

    pub fn key_of(&self, name: &str) -> Option<ElementKey> {
        self.names.get(name).copied()
    }

    pub fn output(&self, key: ElementKey) -> Option<bool> {
        self.elements.get(key).map(Element::output)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = (ElementKey, &Element)> + '_ {
        self.order.keys().map(|key| (key, &self.elements[key]))
    }

    pub fn keys(&self) -> impl Iterator<Item = ElementKey> + '_ {
        self.order.keys()
    }

    pub fn of_kind(&self, kind: Kind) -> Vec<ElementKey> {
        self.iter().filter(|(_, element)| element.kind() == kind).map(|(key, _)| key).collect()
    }

    pub fn switches(&self) -> Vec<ElementKey> {
        self.of_kind(Kind::SWITCH)
    }

    pub fn leds(&self) -> Vec<ElementKey> {
        self.of_kind(Kind::LED)
    }

    /// What feeds each slot of `key`.
    pub fn sources_of(&self, key: ElementKey) -> Option<&[Option<ElementKey>]> {
        self.get(key).map(Element::inputs)
    }

    /// Every `(element, slot)` pair fed by `source`.
    pub fn dependents_of(&self, source: ElementKey) -> Vec<(ElementKey, usize)> {
        self.iter().flat_map(|(key, element)| element.inputs().iter().enumerate().filter(move |(_, input)| **input == Some(source)).map(move |(slot, _)| (key, slot))).collect()
    }
}
