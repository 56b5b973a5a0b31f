use crate::simulation::ElementKey;

/// Keys of the elements in the order they were added.
#[derive(Clone, Debug, Default)]
pub(crate) struct ElementOrder(Vec<ElementKey>);

impl ElementOrder {
    pub(crate) fn keys(&self) -> impl Iterator<Item = ElementKey> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn push(&mut self, key: ElementKey) {
        self.0.push(key);
    }

    /// Drops `key`, shifting later keys down so the relative order of the rest is kept.
    pub(crate) fn remove(&mut self, key: ElementKey) -> bool {
        match self.0.iter().position(|k| *k == key) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}
