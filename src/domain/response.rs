use crate::domain::value::ReplyCode;

/// Ordered per-destination reply codes, one per destination sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub codes: Vec<ReplyCode>,
}

impl Reply {
    pub fn new(codes: Vec<ReplyCode>) -> Self {
        Self { codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReplyCode> {
        self.codes.iter()
    }
}

impl IntoIterator for Reply {
    type Item = ReplyCode;
    type IntoIter = std::vec::IntoIter<ReplyCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.into_iter()
    }
}
