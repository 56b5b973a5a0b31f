/// Every assignment of `arity` booleans in ascending binary order, first element most significant.
pub(crate) fn enumerate_inputs(arity: usize) -> InputAssignments {
    InputAssignments { next: Some(vec![false; arity]) }
}

pub(crate) struct InputAssignments {
    next: Option<Vec<bool>>,
}

impl Iterator for InputAssignments {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;

        // binary increment starting from the least significant (last) position; carrying out of the first position means every assignment was produced
        let mut following = current.clone();
        if let Some(zero) = following.iter().rposition(|bit| !*bit) {
            following[zero] = true;
            following[zero + 1..].iter_mut().for_each(|bit| *bit = false);
            self.next = Some(following);
        }

        Some(current)
    }
}
