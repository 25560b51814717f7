use std::{collections::HashMap, str::FromStr};

use anyhow::{bail, Context, Result};
use quick_xml::{events::BytesStart, Reader};

use super::XmlReaderConversions;

#[derive(Debug)]
pub(crate) struct Attributes {
    data: HashMap<String, String>,
}

impl Attributes {
    /// Creates a new Attributes object by parsing out all the attributes of the
    /// specified tag.
    pub(crate) fn new<R>(tag: &BytesStart<'_>, xml_reader: &Reader<R>) -> Result<Self> {
        let mut data = HashMap::new();

        for attr in tag.attributes() {
            let attr = attr?;
            let key = xml_reader.bytes_to_string(attr.key.as_ref())?;
            let value = attr.unescape_value()?.into_owned();
            data.insert(key, value);
        }

        Ok(Self { data })
    }

    /// Removes an attribute from the list and returns it, if it was there.
    pub(crate) fn take(&mut self, key: &str) -> Option<String> {
        self.data.remove(key)
    }

    /// Gets a mandatory attribute and parses it. The attribute is removed
    /// from the list of attributes and returned to the caller.
    pub(crate) fn get<T>(&mut self, key: &str, element: &str) -> Result<T>
    where
        T: FromStr,
    {
        let value = self.take(key).with_context(|| {
            format!("Mandatory attribute '{key}' was missing on the '{element}' element")
        })?;

        match value.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => bail!(
                "Could not parse {value:?} into {} for attribute '{key}' on the '{element}' element",
                std::any::type_name::<T>()
            ),
        }
    }
}
