use crate::{Operation, OperationRecord, Result, Transform, TransformError, multiply};

/// Fold a sequence of operations into a single composite transform.
///
/// The dimensionality is taken from the first operation.
/// The first operation is the *last* to be applied to a point:
/// `create([a, b, c])` is `a · b · c`, so `c` acts first.
///
/// Operations of lower dimensionality are embedded (see [Transform::embed]);
/// higher dimensionality is an error.
///
/// For a single operation, pass a one-element slice or use [Operation::to_transform].
pub fn create<'a, I>(specs: I) -> Result<Transform>
where
    I: IntoIterator<Item = &'a Operation>,
{
    let specs = specs.into_iter();
    let mut builder = CompositeBuilder::with_capacity(specs.size_hint().0);
    for op in specs {
        builder.add(op)?;
    }
    builder.build()
}

/// Convert each record into an [Operation] and [create] the composite.
pub fn create_from_records(records: &[OperationRecord]) -> Result<Transform> {
    let ops = records
        .iter()
        .map(Operation::try_from)
        .collect::<Result<Vec<_>>>()?;
    create(&ops)
}

/// Incrementally composes operations, following the same ordering as [create].
#[derive(Debug, Default, Clone)]
pub struct CompositeBuilder {
    composite: Option<Transform>,
    ops: Vec<Operation>,
}

impl CompositeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            composite: None,
            ops: Vec::with_capacity(capacity),
        }
    }

    /// Dimensionality of the composite, once the first operation has been added.
    pub fn ndim(&self) -> Option<usize> {
        self.composite.as_ref().map(|t| t.ndim())
    }

    /// The operations added so far, in order.
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Compose an operation after those already added,
    /// i.e. it will be applied to a point *before* them.
    ///
    /// On failure, the builder is left unchanged.
    pub fn add(&mut self, op: &Operation) -> Result<&mut Self> {
        let next = op.to_transform()?;
        let composite = match &self.composite {
            None => {
                log::debug!("Starting {}D composite with {}", next.ndim(), op.kind());
                let ident = Transform::identity(next.ndim())?;
                multiply(&ident, &next)?
            }
            Some(acc) => {
                if next.ndim() < acc.ndim() {
                    log::trace!(
                        "Embedding {}D {} into {}D composite",
                        next.ndim(),
                        op.kind(),
                        acc.ndim()
                    );
                }
                let next = next.embed(acc.ndim())?;
                multiply(acc, &next)?
            }
        };
        log::trace!("Composed {:?}", op);
        self.composite = Some(composite);
        self.ops.push(op.clone());
        Ok(self)
    }

    /// Fails if no operations were added.
    pub fn build(self) -> Result<Transform> {
        let composite = self.composite.ok_or(TransformError::EmptySequence)?;
        log::debug!(
            "Built {}D composite from {} operations",
            composite.ndim(),
            self.ops.len()
        );
        Ok(composite)
    }
}
