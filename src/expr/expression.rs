//! Core expression types for cvxexpr.
//!
//! An [`Expr`] is a cheap handle to an immutable node. Nodes form a DAG: a
//! child may be shared by many parents (reusing a variable in several
//! expressions), but nothing is ever mutated after construction. Shape, sign
//! and curvature are computed once, when the node is built.

use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nalgebra::DMatrix;
use nalgebra_sparse::CscMatrix;

use super::shape::Shape;
use crate::atoms::Atom;
use crate::dcp::{Curvature, Sign};

/// Unique identifier for leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u64);

impl ExprId {
    /// Generate a new unique ID.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        ExprId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::new()
    }
}

/// Array storage for constant values (dense, sparse or scalar).
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    /// Dense matrix storage.
    Dense(DMatrix<f64>),
    /// Sparse CSC matrix storage.
    Sparse(CscMatrix<f64>),
    /// Scalar value.
    Scalar(f64),
}

impl Array {
    /// Get the shape of the array.
    pub fn shape(&self) -> Shape {
        match self {
            Array::Dense(m) => Shape::matrix(m.nrows(), m.ncols()),
            Array::Sparse(m) => Shape::matrix(m.nrows(), m.ncols()),
            Array::Scalar(_) => Shape::scalar(),
        }
    }

    /// Get the total number of elements.
    pub fn size(&self) -> usize {
        self.shape().size()
    }

    /// Try to get as a scalar value.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Array::Scalar(v) => Some(*v),
            Array::Dense(m) if m.nrows() == 1 && m.ncols() == 1 => Some(m[(0, 0)]),
            _ => None,
        }
    }

    /// Check a predicate against every entry, implicit sparse zeros included.
    pub fn all(&self, pred: impl Fn(f64) -> bool) -> bool {
        match self {
            Array::Scalar(v) => pred(*v),
            Array::Dense(m) => m.iter().all(|&v| pred(v)),
            Array::Sparse(m) => {
                let has_implicit_zeros = m.nnz() < m.nrows() * m.ncols();
                m.values().iter().all(|&v| pred(v)) && (!has_implicit_zeros || pred(0.0))
            }
        }
    }

    /// Check if the matrix is positive semi-definite (for symmetric matrices).
    ///
    /// Returns `None` when the question does not apply (non-square,
    /// non-symmetric or sparse storage).
    pub fn is_psd(&self) -> Option<bool> {
        match self {
            Array::Scalar(v) => Some(*v >= 0.0),
            Array::Dense(m) => {
                if m.nrows() != m.ncols() {
                    return None;
                }
                let n = m.nrows();
                for i in 0..n {
                    for j in (i + 1)..n {
                        if (m[(i, j)] - m[(j, i)]).abs() > 1e-10 {
                            return None;
                        }
                    }
                }
                Some(m.clone().cholesky().is_some())
            }
            Array::Sparse(_) => None,
        }
    }

    /// Create from a vector (as a column).
    pub fn from_vec(v: Vec<f64>) -> Self {
        let n = v.len();
        Array::Dense(DMatrix::from_vec(n, 1, v))
    }

    /// Create from a dense matrix.
    pub fn from_matrix(m: DMatrix<f64>) -> Self {
        Array::Dense(m)
    }
}

impl From<f64> for Array {
    fn from(v: f64) -> Self {
        Array::Scalar(v)
    }
}

impl From<Vec<f64>> for Array {
    fn from(v: Vec<f64>) -> Self {
        Array::from_vec(v)
    }
}

impl From<DMatrix<f64>> for Array {
    fn from(m: DMatrix<f64>) -> Self {
        Array::Dense(m)
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Array::Scalar(v) => write!(f, "{}", v),
            Array::Dense(m) if m.nrows() == 1 && m.ncols() == 1 => write!(f, "{}", m[(0, 0)]),
            Array::Dense(m) => {
                f.write_str("[")?;
                for i in 0..m.nrows() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("[")?;
                    for j in 0..m.ncols() {
                        if j > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", m[(i, j)])?;
                    }
                    f.write_str("]")?;
                }
                f.write_str("]")
            }
            Array::Sparse(m) => write!(f, "sparse({}x{}, nnz={})", m.nrows(), m.ncols(), m.nnz()),
        }
    }
}

/// Data for a variable leaf.
#[derive(Debug, Clone)]
pub struct VariableData {
    /// Unique identifier.
    pub id: ExprId,
    /// Shape of the variable.
    pub shape: Shape,
    /// Optional name for display.
    pub name: Option<String>,
    /// Declared sign (`Unknown` unless the caller says otherwise).
    pub sign: Sign,
}

impl VariableData {
    /// Display name: the declared name, or `var<id>`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("var{}", self.id.raw()),
        }
    }
}

/// Data for a constant leaf.
#[derive(Debug, Clone)]
pub struct ConstantData {
    /// Unique identifier.
    pub id: ExprId,
    /// The constant value.
    pub value: Array,
}

impl ConstantData {
    /// Get the shape of the constant.
    pub fn shape(&self) -> Shape {
        self.value.shape()
    }
}

/// Half-open row and column ranges selected by an index operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexSpec {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl IndexSpec {
    /// Select a single entry.
    pub fn element(row: usize, col: usize) -> Self {
        IndexSpec {
            rows: row..row.saturating_add(1),
            cols: col..col.saturating_add(1),
        }
    }

    /// Select a block.
    pub fn block(rows: Range<usize>, cols: Range<usize>) -> Self {
        IndexSpec { rows, cols }
    }

    /// Shape of the selection.
    pub fn shape(&self) -> Shape {
        Shape::new(self.rows.len(), self.cols.len())
    }

    /// Check the selection is non-empty and fits inside `shape`.
    pub fn fits(&self, shape: Shape) -> bool {
        !self.rows.is_empty()
            && !self.cols.is_empty()
            && self.rows.end <= shape.rows()
            && self.cols.end <= shape.cols()
    }
}

impl fmt::Display for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn range(f: &mut fmt::Formatter<'_>, r: &Range<usize>) -> fmt::Result {
            if r.len() == 1 {
                write!(f, "{}", r.start)
            } else {
                write!(f, "{}:{}", r.start, r.end)
            }
        }
        f.write_str("[")?;
        range(f, &self.rows)?;
        f.write_str(",")?;
        range(f, &self.cols)?;
        f.write_str("]")
    }
}

/// The operator at the root of an expression.
#[derive(Debug)]
pub enum ExprKind {
    /// A decision variable.
    Variable(VariableData),
    /// A constant value.
    Constant(ConstantData),
    /// An atom applied to its ordered arguments.
    Atom(Atom, Vec<Expr>),
}

#[derive(Debug)]
struct ExprNode {
    kind: ExprKind,
    shape: Shape,
    sign: Sign,
    curvature: Curvature,
}

/// An immutable expression.
///
/// Cloning an `Expr` is cheap: it shares the underlying node.
#[derive(Clone)]
pub struct Expr(Arc<ExprNode>);

impl Expr {
    fn from_node(kind: ExprKind, shape: Shape, sign: Sign, curvature: Curvature) -> Self {
        Expr(Arc::new(ExprNode {
            kind,
            shape,
            sign,
            curvature,
        }))
    }

    /// Build a variable leaf.
    pub(crate) fn from_variable(data: VariableData) -> Self {
        let shape = data.shape;
        let sign = data.sign;
        Self::from_node(ExprKind::Variable(data), shape, sign, Curvature::Affine)
    }

    /// Build a constant leaf.
    pub(crate) fn from_constant(data: ConstantData) -> Self {
        let shape = data.shape();
        let sign = Sign::of_array(&data.value);
        Self::from_node(ExprKind::Constant(data), shape, sign, Curvature::Constant)
    }

    /// Build an atom node whose arguments and shape were already validated.
    pub(crate) fn from_atom(atom: Atom, args: Vec<Expr>, shape: Shape) -> Self {
        let sign = atom.infer_sign(&args);
        let curvature = atom.infer_curvature(&args);
        Self::from_node(ExprKind::Atom(atom, args), shape, sign, curvature)
    }

    /// The operator at the root of this expression.
    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    /// Get the shape of the expression.
    pub fn shape(&self) -> Shape {
        self.0.shape
    }

    /// Get the sign of the expression.
    pub fn sign(&self) -> Sign {
        self.0.sign
    }

    /// Get the curvature of the expression.
    pub fn curvature(&self) -> Curvature {
        self.0.curvature
    }

    /// The atom at the root, if this is not a leaf.
    pub fn atom(&self) -> Option<&Atom> {
        match &self.0.kind {
            ExprKind::Atom(atom, _) => Some(atom),
            _ => None,
        }
    }

    /// Ordered children (empty for leaves).
    pub fn args(&self) -> &[Expr] {
        match &self.0.kind {
            ExprKind::Atom(_, args) => args,
            _ => &[],
        }
    }

    /// Check if this expression is a leaf.
    pub fn is_leaf(&self) -> bool {
        !matches!(self.0.kind, ExprKind::Atom(..))
    }

    /// Get the unique ID if this is a variable.
    pub fn variable_id(&self) -> Option<ExprId> {
        match &self.0.kind {
            ExprKind::Variable(v) => Some(v.id),
            _ => None,
        }
    }

    /// Check if this expression is a constant leaf.
    pub fn is_constant(&self) -> bool {
        matches!(self.0.kind, ExprKind::Constant(_))
    }

    /// Check if this expression is a variable leaf.
    pub fn is_variable(&self) -> bool {
        matches!(self.0.kind, ExprKind::Variable(_))
    }

    /// Get the constant value if this is a constant leaf.
    pub fn constant_value(&self) -> Option<&Array> {
        match &self.0.kind {
            ExprKind::Constant(c) => Some(&c.value),
            _ => None,
        }
    }

    /// Check whether two handles point at the same node.
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Collect all variables in this expression, sorted and deduplicated.
    pub fn variables(&self) -> Vec<ExprId> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<ExprId>) {
        match &self.0.kind {
            ExprKind::Variable(v) => vars.push(v.id),
            ExprKind::Constant(_) => {}
            ExprKind::Atom(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Collect every variable leaf together with its shape.
    pub fn variable_shapes(&self) -> Vec<(ExprId, Shape)> {
        let mut out = Vec::new();
        self.collect_variable_shapes(&mut out);
        out.sort_by_key(|(id, _)| *id);
        out.dedup_by_key(|(id, _)| *id);
        out
    }

    fn collect_variable_shapes(&self, out: &mut Vec<(ExprId, Shape)>) {
        match &self.0.kind {
            ExprKind::Variable(v) => out.push((v.id, v.shape)),
            ExprKind::Constant(_) => {}
            ExprKind::Atom(_, args) => {
                for arg in args {
                    arg.collect_variable_shapes(out);
                }
            }
        }
    }

    /// Deterministic, human-readable name, e.g. `vstack(x, y, x)`.
    ///
    /// Used for diagnostics only, never for identity.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Binding strength of the root operator when printed.
    pub(crate) fn precedence(&self) -> u8 {
        match &self.0.kind {
            ExprKind::Atom(atom, _) => atom.precedence(),
            _ => u8::MAX,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            ExprKind::Variable(v) => f.write_str(&v.display_name()),
            ExprKind::Constant(c) => write!(f, "{}", c.value),
            ExprKind::Atom(atom, args) => atom.fmt_application(args, f),
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("name", &self.name())
            .field("shape", &self.shape())
            .field("sign", &self.sign())
            .field("curvature", &self.curvature())
            .finish()
    }
}

// Numeric literals promote to constant leaves
impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        crate::expr::constant(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        crate::expr::constant(value as f64)
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}
