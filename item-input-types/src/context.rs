use crate::Value;

/// One level of the build context: the value decided so far by an enclosing
/// record or list, labelled with the name of the definition that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    name: String,
    value: Value,
}

impl Slot {
    /// Name of the record or list definition that contributed this slot.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the siblings (record) or items (list) decided so far.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// The chain of already-decided ancestor values threaded through every nested
/// definition, innermost first.
///
/// Slot 0 is always the record or list currently being built. Each nesting
/// level pushes its own slot with [`Context::push`], borrowing the parent chain.
#[derive(Debug, Clone, Default)]
pub struct Context<'p> {
    slot: Option<Slot>,
    parent: Option<&'p Context<'p>>,
}

impl<'p> Context<'p> {
    /// The empty context of a top-level build.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a child context whose slot 0 is `value`.
    pub fn push(&'p self, name: impl Into<String>, value: Value) -> Context<'p> {
        Context {
            slot: Some(Slot {
                name: name.into(),
                value,
            }),
            parent: Some(self),
        }
    }

    /// A context identical to this one except that slot 0 holds `value`.
    ///
    /// Used to look at the record as it was before an edit.
    pub fn with_current(&self, value: Value) -> Context<'p> {
        match &self.slot {
            Some(slot) => Context {
                slot: Some(Slot {
                    name: slot.name.clone(),
                    value,
                }),
                parent: self.parent,
            },
            None => self.clone(),
        }
    }

    /// Check if there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots().next().is_none()
    }

    /// Number of slots in the chain.
    pub fn len(&self) -> usize {
        self.slots().count()
    }

    /// Iterate over the slots, innermost first.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        let mut next = Some(self);
        std::iter::from_fn(move || {
            while let Some(context) = next {
                next = context.parent;
                if let Some(slot) = &context.slot {
                    return Some(slot);
                }
            }
            None
        })
    }

    /// The value of slot 0: the siblings decided so far in the current record or list.
    pub fn current(&self) -> Option<&Value> {
        self.get(0)
    }

    /// The value at `index`, 0 being the innermost.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots().nth(index).map(Slot::value)
    }

    /// The chain without slot 0.
    pub fn parent(&self) -> Option<&Context<'p>> {
        self.parent
    }

    /// The value of the innermost slot contributed by the definition called `name`.
    pub fn find(&self, name: &str) -> Option<&Value> {
        self.slots()
            .find(|slot| slot.name == name)
            .map(Slot::value)
    }

    /// The value of field `key` in the innermost record that has it.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.slots().find_map(|slot| slot.value.get(key))
    }
}
