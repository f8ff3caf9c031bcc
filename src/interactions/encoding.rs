use std::collections::BTreeSet;

/// Categorical encoding of a set of identifiers.
///
/// Codes are contiguous, start at zero and follow the byte-wise sort order of
/// the identifiers, so the same set of values always gets the same codes no
/// matter the order they were observed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    values: Vec<String>,
}

impl Categories {
    pub fn from_values<'a, I>(values: I) -> Categories
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        Categories {
            values: distinct.into_iter().map(str::to_owned).collect(),
        }
    }

    pub fn code(&self, value: &str) -> Option<usize> {
        self.values
            .binary_search_by(|candidate| candidate.as_str().cmp(value))
            .ok()
    }

    pub fn value(&self, code: usize) -> Option<&str> {
        self.values.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}
