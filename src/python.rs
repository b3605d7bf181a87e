//! Python extension module
//!
//! Requests and responses cross the boundary as plain Python dictionaries and
//! lists, converted with `pythonize`. Invalid requests raise `ValueError`; a
//! failed net benefit calculation raises `RuntimeError`.

use crate::api::{self, CalculationService};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use rscarbon_components::config::CalculationConfig;
use rscarbon_core::errors::{RSCarbonError, RSCarbonResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

fn to_py_err(error: RSCarbonError) -> PyErr {
    match error {
        RSCarbonError::Computation { .. } => PyRuntimeError::new_err(error.to_string()),
        _ => PyValueError::new_err(error.to_string()),
    }
}

/// Depythonize a request, run `operation` and pythonize its response
fn call<Req, Resp>(
    py: Python<'_>,
    request: &Bound<'_, PyAny>,
    operation: impl FnOnce(&Req) -> RSCarbonResult<Resp>,
) -> PyResult<PyObject>
where
    Req: DeserializeOwned,
    Resp: Serialize,
{
    let request: Req =
        pythonize::depythonize(request).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let response = operation(&request).map_err(to_py_err)?;
    Ok(pythonize::pythonize(py, &response)?.unbind())
}

#[pyclass(name = "CalculationService", frozen)]
pub struct PyCalculationService(CalculationService);

#[pymethods]
impl PyCalculationService {
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let config = match config {
            Some(config) => pythonize::depythonize::<CalculationConfig>(config)
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => CalculationConfig::default(),
        };
        Ok(Self(CalculationService::new(config)))
    }

    #[staticmethod]
    fn from_toml(contents: &str) -> PyResult<Self> {
        let config = CalculationConfig::from_toml_str(contents).map_err(to_py_err)?;
        Ok(Self(CalculationService::new(config)))
    }

    #[staticmethod]
    fn from_toml_file(path: PathBuf) -> PyResult<Self> {
        CalculationService::from_toml_file(path)
            .map(Self)
            .map_err(to_py_err)
    }

    fn config(&self, py: Python<'_>) -> PyResult<PyObject> {
        Ok(pythonize::pythonize(py, self.0.config())?.unbind())
    }

    fn estimate_biomass(&self, py: Python<'_>, request: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        call(py, request, |r| self.0.estimate_biomass(r))
    }

    fn estimate_soc(&self, py: Python<'_>, request: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        call(py, request, |r| self.0.estimate_soc(r))
    }

    fn simulate_turnover(&self, py: Python<'_>, request: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        call(py, request, |r| self.0.simulate_turnover(r))
    }

    fn estimate_baseline(&self, py: Python<'_>, request: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        call(py, request, |r| self.0.estimate_baseline(r))
    }

    fn compute_net_benefit(
        &self,
        py: Python<'_>,
        request: &Bound<'_, PyAny>,
    ) -> PyResult<PyObject> {
        call(py, request, |r| self.0.compute_net_benefit(r))
    }
}

#[pyfunction]
fn health(py: Python<'_>) -> PyResult<PyObject> {
    Ok(pythonize::pythonize(py, &api::health())?.unbind())
}

#[pymodule]
#[pyo3(name = "_lib")]
fn rscarbon(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyCalculationService>()?;
    m.add_function(wrap_pyfunction!(health, m)?)?;
    Ok(())
}
