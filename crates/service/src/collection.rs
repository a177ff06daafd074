use models::{
    DeviceFields, InstallationFields, ProductFields, Record, RecordFields, RecordId, RenewalFields, RmaFields,
    ScheduleFields,
};

/// Ordered record set of one kind.
///
/// Insertion order is kept; updates replace in place. Nothing here
/// touches storage or validates fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<F> {
    records: Vec<Record<F>>,
}

impl<F> Default for Collection<F> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<F: RecordFields> Collection<F> {
    pub fn from_records(records: Vec<Record<F>>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record<F>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record<F>> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn push(&mut self, record: Record<F>) {
        self.records.push(record);
    }

    /// Replace the fields of `id` keeping its position. `false` if absent.
    pub fn replace(&mut self, id: &RecordId, fields: F) -> bool {
        match self.records.iter_mut().find(|r| &r.id == id) {
            Some(slot) => {
                slot.fields = fields;
                true
            }
            None => false,
        }
    }

    /// Remove `id`. `false` if absent.
    pub fn remove(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| &r.id != id);
        before != self.records.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self::from_records)
    }
}

/// The six record sets held by the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collections {
    pub schedules: Collection<ScheduleFields>,
    pub renewals: Collection<RenewalFields>,
    pub rmas: Collection<RmaFields>,
    pub installations: Collection<InstallationFields>,
    pub products: Collection<ProductFields>,
    pub devices: Collection<DeviceFields>,
}

/// Maps a field type to its record set inside [`Collections`].
pub trait StoredKind: RecordFields {
    fn collection(all: &Collections) -> &Collection<Self>;
    fn collection_mut(all: &mut Collections) -> &mut Collection<Self>;
}

macro_rules! stored_kind {
    ($fields:ty => $field:ident) => {
        impl StoredKind for $fields {
            fn collection(all: &Collections) -> &Collection<Self> {
                &all.$field
            }

            fn collection_mut(all: &mut Collections) -> &mut Collection<Self> {
                &mut all.$field
            }
        }
    };
}

stored_kind!(ScheduleFields => schedules);
stored_kind!(RenewalFields => renewals);
stored_kind!(RmaFields => rmas);
stored_kind!(InstallationFields => installations);
stored_kind!(ProductFields => products);
stored_kind!(DeviceFields => devices);

impl Collections {
    /// Every identifier across all six sets.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.schedules
            .records()
            .iter()
            .map(|r| &r.id)
            .chain(self.renewals.records().iter().map(|r| &r.id))
            .chain(self.rmas.records().iter().map(|r| &r.id))
            .chain(self.installations.records().iter().map(|r| &r.id))
            .chain(self.products.records().iter().map(|r| &r.id))
            .chain(self.devices.records().iter().map(|r| &r.id))
    }
}
