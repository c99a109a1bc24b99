use super::{GqElement, Group, ZqElement};
use crate::error::{CoreError, CoreResult};

/// Common interface of every value that belongs to a single [`Group`] and
/// optionally carries a fixed internal size (e.g. a ciphertext is a pair of
/// `GqElement`s; a bare `GqElement` has no internal size). [`GroupVector`]
/// and [`GroupMatrix`](super::GroupMatrix) use this to check, at
/// construction, that every member shares one group identity and (when
/// `member_size` is `Some`) one size.
pub trait GroupMember {
    fn group(&self) -> &Group;

    /// `Some(n)` when every instance of this type has exactly `n` group
    /// elements inside it (e.g. a ciphertext's two components); `None` when
    /// there is nothing further to check (e.g. a bare [`GqElement`]).
    fn member_size(&self) -> Option<usize> {
        None
    }
}

impl GroupMember for GqElement {
    fn group(&self) -> &Group {
        GqElement::group(self)
    }
}

impl GroupMember for ZqElement {
    fn group(&self) -> &Group {
        ZqElement::group(self)
    }
}

/// A non-empty, group-homogeneous vector of `T: GroupMember`.
///
/// Construction checks that every element belongs to the same group and
/// (for `T` with a fixed `member_size`) that every element reports the same
/// size, so that a later zip/fold over two vectors never has to re-check.
#[derive(Debug, Clone)]
pub struct GroupVector<T: GroupMember> {
    elements: Vec<T>,
}

impl<T: GroupMember> GroupVector<T> {
    pub fn new(elements: Vec<T>) -> CoreResult<Self> {
        if elements.is_empty() {
            return Err(CoreError::invalid("GroupVector must be non-empty"));
        }
        let group = elements[0].group().clone();
        let size = elements[0].member_size();
        for e in &elements[1..] {
            if *e.group() != group {
                return Err(CoreError::invalid(
                    "all elements of a GroupVector must share one group",
                ));
            }
            if e.member_size() != size {
                return Err(CoreError::invalid(
                    "all elements of a GroupVector must share one member size",
                ));
            }
        }
        Ok(GroupVector { elements })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn group(&self) -> &Group {
        self.elements[0].group()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Appends `tail`'s elements after this vector's, re-checking the
    /// combined group/size homogeneity.
    pub fn append(mut self, tail: GroupVector<T>) -> CoreResult<Self>
    where
        T: Clone,
    {
        self.elements.extend(tail.elements);
        GroupVector::new(self.elements)
    }

    /// Prepends `head`'s elements before this vector's.
    pub fn prepend(self, head: GroupVector<T>) -> CoreResult<Self>
    where
        T: Clone,
    {
        head.append(self)
    }

    /// The elements in `range`, as a fresh homogeneity-checked vector.
    pub fn slice(&self, range: std::ops::Range<usize>) -> CoreResult<Self>
    where
        T: Clone,
    {
        if range.end > self.elements.len() || range.start > range.end {
            return Err(CoreError::invalid("GroupVector::slice range out of bounds"));
        }
        GroupVector::new(self.elements[range].to_vec())
    }
}

impl<T: GroupMember> std::ops::Index<usize> for GroupVector<T> {
    type Output = T;
    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupParams;
    use num_bigint::BigUint;

    #[test]
    fn rejects_empty() {
        let result: CoreResult<GroupVector<GqElement>> = GroupVector::new(vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_mixed_groups() {
        let small = GroupParams::small_test_group();
        let medium = GroupParams::medium_test_group();
        let a = GqElement::new(small, BigUint::from(3u32)).unwrap();
        let b = GqElement::new(medium, BigUint::from(4u32)).unwrap();
        assert!(GroupVector::new(vec![a, b]).is_err());
    }

    #[test]
    fn accepts_homogeneous_vector() {
        let grp = GroupParams::small_test_group();
        let a = GqElement::new(grp.clone(), BigUint::from(3u32)).unwrap();
        let b = GqElement::new(grp, BigUint::from(4u32)).unwrap();
        let v = GroupVector::new(vec![a, b]).unwrap();
        assert_eq!(v.len(), 2);
    }
}
