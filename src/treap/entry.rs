use serde_derive::{Deserialize, Serialize};

/// A key and the payload stored alongside it. Only the key takes part in ordering.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Entry<T, U> {
    pub key: T,
    pub value: U,
}

impl<T, U> Entry<T, U> {
    pub fn into_pair(self) -> (T, U) {
        let Entry { key, value } = self;
        (key, value)
    }
}
