//! This module contains the normalization pipeline: an ordered list of stages which progressively
//! populate a typed state, from raw json to the data model handed to an optimizer.
//!
//! Every stage declares the fields it reads and the single field it writes. Declarations are
//! checked when a pipeline is constructed, so a stage can never observe a field which is not
//! populated yet.

#[cfg(test)]
#[path = "../tests/unit/pipeline_test.rs"]
mod pipeline_test;

use crate::format::problem::*;
use crate::format::solution::*;
use crate::format::{ErrorKind, FormatError, MultiFormatError};
use crate::validation::ValidationContext;
use serde_json::Value;
use vrp_seed_core::models::{DataModel, MatrixAttributes, ServiceAttributes, VehicleAttributes};
use vrp_seed_core::utils::{Environment, GenericError, GenericResult};

/// A field of pipeline state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Raw problem json, available from the start.
    RawProblem,
    /// Typed problem.
    Problem,
    /// Service index.
    ServiceIndex,
    /// Service attributes.
    Services,
    /// Vehicle attributes.
    Vehicles,
    /// Augmented matrices.
    Matrices,
    /// Seed paths.
    InitialPaths,
}

/// Fields required to assemble a data model.
const REQUIRED_FIELDS: [Field; 6] =
    [Field::Problem, Field::ServiceIndex, Field::Services, Field::Vehicles, Field::Matrices, Field::InitialPaths];

/// A value produced by a stage.
pub enum StageOutput {
    /// Typed problem.
    Problem(Problem),
    /// Service index.
    ServiceIndex(ServiceIndex),
    /// Service attributes.
    Services(ServiceAttributes),
    /// Vehicle attributes.
    Vehicles(VehicleAttributes),
    /// Augmented matrices.
    Matrices(MatrixAttributes),
    /// Seed paths.
    InitialPaths(InitialPaths),
}

impl StageOutput {
    /// Returns the field which keeps the output.
    pub fn field(&self) -> Field {
        match self {
            StageOutput::Problem(_) => Field::Problem,
            StageOutput::ServiceIndex(_) => Field::ServiceIndex,
            StageOutput::Services(_) => Field::Services,
            StageOutput::Vehicles(_) => Field::Vehicles,
            StageOutput::Matrices(_) => Field::Matrices,
            StageOutput::InitialPaths(_) => Field::InitialPaths,
        }
    }
}

/// A progressively populated pipeline state.
pub struct PipelineState {
    /// Seed solution settings.
    pub settings: InitialSettings,
    raw: Option<Value>,
    problem: Option<Problem>,
    index: Option<ServiceIndex>,
    services: Option<ServiceAttributes>,
    vehicles: Option<VehicleAttributes>,
    matrices: Option<MatrixAttributes>,
    initial: Option<InitialPaths>,
}

fn missing_field(field: Field) -> MultiFormatError {
    FormatError::new(
        "E0002",
        ErrorKind::MissingRequiredField,
        format!("pipeline field '{field:?}' is not populated"),
        "declare a stage which writes the field before reading it".to_string(),
    )
    .into()
}

fn require<T>(value: &Option<T>, field: Field) -> Result<&T, MultiFormatError> {
    value.as_ref().ok_or_else(|| missing_field(field))
}

impl PipelineState {
    /// Creates a new state with raw problem.
    pub fn new(raw: Value, settings: InitialSettings) -> Self {
        Self {
            settings,
            raw: Some(raw),
            problem: None,
            index: None,
            services: None,
            vehicles: None,
            matrices: None,
            initial: None,
        }
    }

    /// Returns raw problem.
    pub fn raw(&self) -> Result<&Value, MultiFormatError> {
        require(&self.raw, Field::RawProblem)
    }

    /// Returns typed problem.
    pub fn problem(&self) -> Result<&Problem, MultiFormatError> {
        require(&self.problem, Field::Problem)
    }

    /// Returns service index.
    pub fn index(&self) -> Result<&ServiceIndex, MultiFormatError> {
        require(&self.index, Field::ServiceIndex)
    }

    /// Returns service attributes.
    pub fn services(&self) -> Result<&ServiceAttributes, MultiFormatError> {
        require(&self.services, Field::Services)
    }

    /// Returns vehicle attributes.
    pub fn vehicles(&self) -> Result<&VehicleAttributes, MultiFormatError> {
        require(&self.vehicles, Field::Vehicles)
    }

    /// Returns augmented matrices.
    pub fn matrices(&self) -> Result<&MatrixAttributes, MultiFormatError> {
        require(&self.matrices, Field::Matrices)
    }

    /// Returns seed paths.
    pub fn initial(&self) -> Result<&InitialPaths, MultiFormatError> {
        require(&self.initial, Field::InitialPaths)
    }

    fn store(&mut self, output: StageOutput) {
        match output {
            StageOutput::Problem(problem) => self.problem = Some(problem),
            StageOutput::ServiceIndex(index) => self.index = Some(index),
            StageOutput::Services(services) => self.services = Some(services),
            StageOutput::Vehicles(vehicles) => self.vehicles = Some(vehicles),
            StageOutput::Matrices(matrices) => self.matrices = Some(matrices),
            StageOutput::InitialPaths(initial) => self.initial = Some(initial),
        }
    }

    fn into_normalized(self) -> Result<NormalizedProblem, MultiFormatError> {
        let initial = self.initial.ok_or_else(|| missing_field(Field::InitialPaths))?;

        let model = DataModel {
            services: self.services.ok_or_else(|| missing_field(Field::Services))?,
            vehicles: self.vehicles.ok_or_else(|| missing_field(Field::Vehicles))?,
            matrices: self.matrices.ok_or_else(|| missing_field(Field::Matrices))?,
            paths: initial.paths,
            unassigned_services: initial.unassigned,
        };

        model.verify().map_err(|err| {
            MultiFormatError::from(FormatError::new_with_details(
                "E1700",
                ErrorKind::ShapeMismatch,
                "normalized data model is inconsistent".to_string(),
                "check problem for conflicting counts".to_string(),
                err.to_string(),
            ))
        })?;

        Ok(NormalizedProblem {
            problem: self.problem.ok_or_else(|| missing_field(Field::Problem))?,
            index: self.index.ok_or_else(|| missing_field(Field::ServiceIndex))?,
            model,
        })
    }
}

/// A side-effect free check of the inputs a stage reads.
pub type VerifyFn = fn(&PipelineState) -> Result<(), MultiFormatError>;

/// Produces stage output from the inputs it reads.
pub type ProcessFn = fn(&PipelineState, &Environment) -> Result<StageOutput, MultiFormatError>;

/// A pipeline stage.
#[derive(Clone)]
pub struct Stage {
    /// Stage name used in logs.
    pub name: &'static str,
    /// Fields read by the stage.
    pub reads: &'static [Field],
    /// A field written by the stage.
    pub writes: Field,
    /// Checks inputs.
    pub verify: VerifyFn,
    /// Produces output.
    pub process: ProcessFn,
}

/// A result of a pipeline run.
pub struct NormalizedProblem {
    /// Typed problem.
    pub problem: Problem,
    /// Service index.
    pub index: ServiceIndex,
    /// Data model with seed solution.
    pub model: DataModel,
}

/// An ordered list of stages.
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Creates a pipeline checking that every field is written once and before it is read.
    pub fn new(stages: Vec<Stage>) -> GenericResult<Self> {
        let mut available = vec![Field::RawProblem];

        for stage in stages.iter() {
            if let Some(field) = stage.reads.iter().find(|&field| !available.contains(field)) {
                return Err(format!("stage '{}' reads '{field:?}' before it is written", stage.name).into());
            }

            if available.contains(&stage.writes) {
                let (name, field) = (stage.name, stage.writes);
                return Err(format!("stage '{name}' writes '{field:?}' which is already written").into());
            }

            available.push(stage.writes);
        }

        if let Some(field) = REQUIRED_FIELDS.iter().find(|&field| !available.contains(field)) {
            return Err(GenericError::from(format!("no stage writes required field '{field:?}'")));
        }

        Ok(Self { stages })
    }

    /// Returns stages in execution order.
    pub fn stages(&self) -> &[Stage] {
        self.stages.as_slice()
    }

    /// Runs stages one by one, the first failure aborts the run.
    pub fn run(
        &self,
        raw: Value,
        settings: InitialSettings,
        environment: &Environment,
    ) -> Result<NormalizedProblem, MultiFormatError> {
        let logger = &environment.logger;
        let mut state = PipelineState::new(raw, settings);

        for stage in self.stages.iter() {
            (logger)(&format!("stage '{}': verify", stage.name));
            let result = (stage.verify)(&state).and_then(|_| {
                (logger)(&format!("stage '{}': process", stage.name));
                (stage.process)(&state, environment)
            });

            let output = result
                .and_then(|output| {
                    if output.field() == stage.writes {
                        Ok(output)
                    } else {
                        Err(FormatError::new(
                            "E0003",
                            ErrorKind::ShapeMismatch,
                            format!("stage produced '{:?}' instead of '{:?}'", output.field(), stage.writes),
                            "fix stage declaration".to_string(),
                        )
                        .into())
                    }
                })
                .inspect_err(|err| (logger)(&format!("stage '{}' failed: {err}", stage.name)))?;

            state.store(output);
        }

        let normalized = state.into_normalized().inspect_err(|err| (logger)(&format!("data model failed: {err}")))?;

        (logger)(&format!(
            "data model ready: {} services, {} vehicles, matrix dimension {}",
            normalized.model.num_services(),
            normalized.model.num_vehicle(),
            normalized.model.matrices.dimension()
        ));

        Ok(normalized)
    }
}

/// Creates the default seed pipeline.
pub fn create_seed_pipeline() -> GenericResult<Pipeline> {
    Pipeline::new(vec![
        Stage {
            name: "problem validator",
            reads: &[Field::RawProblem],
            writes: Field::Problem,
            verify: |state| ValidationContext::new(state.raw()?).validate(),
            process: |state, _| deserialize_problem(state.raw()?.clone()).map(StageOutput::Problem),
        },
        Stage {
            name: "index mapper",
            reads: &[Field::Problem],
            writes: Field::ServiceIndex,
            verify: |state| verify_index(state.problem()?),
            process: |state, environment| {
                let index = ServiceIndex::new(state.problem()?)?;
                let rests = index.len() - index.num_real();
                (environment.logger)(&format!("indexed {} service visits, {rests} rests", index.num_real()));
                Ok(StageOutput::ServiceIndex(index))
            },
        },
        Stage {
            name: "service attributes",
            reads: &[Field::Problem, Field::ServiceIndex],
            writes: Field::Services,
            verify: |state| verify_services(state.problem()?),
            process: |state, environment| {
                read_service_attributes(state.problem()?, state.index()?, &environment.logger)
                    .map(StageOutput::Services)
            },
        },
        Stage {
            name: "vehicle attributes",
            reads: &[Field::Problem],
            writes: Field::Vehicles,
            verify: |state| verify_vehicles(state.problem()?),
            process: |state, environment| {
                read_vehicle_attributes(state.problem()?, &environment.logger).map(StageOutput::Vehicles)
            },
        },
        Stage {
            name: "matrices",
            reads: &[Field::Problem],
            writes: Field::Matrices,
            verify: |state| verify_matrices(state.problem()?),
            process: |state, environment| {
                read_matrices(state.problem()?, &environment.logger).map(StageOutput::Matrices)
            },
        },
        Stage {
            name: "initial solution",
            reads: &[Field::Problem, Field::ServiceIndex, Field::Services, Field::Matrices],
            writes: Field::InitialPaths,
            verify: |state| {
                verify_initial_solution(state.problem()?, state.index()?, state.matrices()?, &state.settings)
            },
            process: |state, environment| {
                read_init_solution(
                    state.problem()?,
                    state.index()?,
                    state.services()?,
                    state.matrices()?,
                    &state.settings,
                    environment,
                )
                .map(StageOutput::InitialPaths)
            },
        },
    ])
}
