#![allow(clippy::useless_conversion)]

use hungarian_core::{solve_with_options, AssignmentError, CostMatrix, SolveStats, SolverOptions};
use numpy::{PyArray1, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;

fn build_matrix(cost: PyReadonlyArray2<'_, i64>) -> PyResult<CostMatrix> {
    let view = cost.as_array();
    let (rows, cols) = view.dim();
    if rows != cols {
        return Err(pyo3::exceptions::PyValueError::new_err(format!(
            "cost matrix must be square, got {rows}x{cols}"
        )));
    }
    let data: Vec<i64> = view.iter().copied().collect();
    CostMatrix::new(rows, data).map_err(to_py_err)
}

fn build_options(
    check_invariants: Option<bool>,
    record_phases: Option<bool>,
) -> SolverOptions {
    let mut opts = SolverOptions::default();
    if let Some(value) = check_invariants {
        opts.check_invariants = value;
    }
    if let Some(value) = record_phases {
        opts.record_phases = value;
    }
    opts
}

fn to_py_err(err: AssignmentError) -> PyErr {
    if err.is_invariant_violation() {
        pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
    } else {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

fn stats_to_dict(py: Python<'_>, stats: &SolveStats) -> PyResult<PyObject> {
    let dict = PyDict::new_bound(py);
    dict.set_item("phases", stats.phases)?;
    dict.set_item("dual_updates", stats.dual_updates)?;
    dict.set_item("zero_theta_rounds", stats.zero_theta_rounds)?;
    dict.set_item("columns_labelled", stats.columns_labelled)?;
    dict.set_item("longest_augmenting_path", stats.longest_augmenting_path)?;
    if !stats.phase_records.is_empty() {
        let records = stats
            .phase_records
            .iter()
            .map(|record| {
                let entry = PyDict::new_bound(py);
                entry.set_item("phase", record.phase)?;
                entry.set_item("roots", record.roots)?;
                entry.set_item("rounds", record.rounds)?;
                entry.set_item("labelled_rows", record.labelled_rows)?;
                entry.set_item("path_len", record.path_len)?;
                entry.set_item("dual_objective", record.dual_objective)?;
                Ok(entry.to_object(py))
            })
            .collect::<PyResult<Vec<PyObject>>>()?;
        dict.set_item("phase_records", records)?;
    }
    Ok(dict.to_object(py))
}

#[pyfunction]
fn assignment_cost(cost: PyReadonlyArray2<'_, i64>) -> PyResult<i128> {
    let matrix = build_matrix(cost)?;
    let assignment =
        solve_with_options(&matrix, &SolverOptions::default()).map_err(to_py_err)?;
    Ok(assignment.cost)
}

#[pyfunction]
#[pyo3(signature = (cost, *, check_invariants = None, record_phases = None))]
fn solve_assignment(
    py: Python<'_>,
    cost: PyReadonlyArray2<'_, i64>,
    check_invariants: Option<bool>,
    record_phases: Option<bool>,
) -> PyResult<(Py<PyArray1<i64>>, i128, PyObject)> {
    let matrix = build_matrix(cost)?;
    let opts = build_options(check_invariants, record_phases);
    let assignment = solve_with_options(&matrix, &opts).map_err(to_py_err)?;

    let columns: Vec<i64> = assignment
        .row_to_column
        .iter()
        .map(|&col| col as i64)
        .collect();
    let stats = stats_to_dict(py, &assignment.stats)?;
    Ok((
        PyArray1::from_vec_bound(py, columns).unbind(),
        assignment.cost,
        stats,
    ))
}

#[pymodule]
fn _core(_py: Python<'_>, module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add("__version__", env!("CARGO_PKG_VERSION"))?;
    module.add_function(wrap_pyfunction!(solve_assignment, module)?)?;
    module.add_function(wrap_pyfunction!(assignment_cost, module)?)?;
    module.add("__doc__", "Rust core bindings for the Hungarian assignment solver")?;
    module.add(
        "__all__",
        vec!["solve_assignment", "assignment_cost", "__version__"],
    )?;
    Ok(())
}
