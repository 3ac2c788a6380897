//! Round-driven processing
//!
//! A [`Processor`] runs the whole pipeline over one fact set: model builder,
//! inheritance resolver, plan lowering, emission. A [`Session`] spans several
//! discovery rounds; every round rebuilds the model from all facts seen so
//! far, and types already written are never written twice.

use crate::binding::ModelBuilder;
use crate::error::{CodegenError, CodegenResult, Diagnostics, EmissionError, ModelError};
use crate::facts::Manifest;
use crate::hierarchy::{EmissionSet, resolve};
use crate::java::GeneratedSource;
use crate::java::extra_binder::generate_extra_binder;
use crate::java::intent_builder::generate_intent_builder;
use crate::java::navigator::{generate_dispatch_table, generate_navigator};
use crate::model::BindingSet;
use crate::navigator::NavigatorPlan;
use crate::options::GeneratorOptions;
use crate::oracle::ManifestOracle;
use crate::plan::{BuilderPlan, InitialState, InjectionPlan};
use crate::sink::SourceSink;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Everything derived from one fact set, before emission
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    #[serde(skip)]
    pub model: BindingSet,
    #[serde(skip)]
    pub emission: EmissionSet,
    /// Builders of generation roots, then sequence-only builders
    pub builders: Vec<BuilderPlan>,
    /// One binder per target
    pub binders: Vec<InjectionPlan>,
    pub navigator: NavigatorPlan,
    pub diagnostics: Diagnostics,
}

impl Analysis {
    pub fn builder(&self, target: &str) -> Option<&BuilderPlan> {
        self.builders.iter().find(|plan| plan.target == target)
    }

    pub fn binder(&self, target: &str) -> Option<&InjectionPlan> {
        self.binders.iter().find(|plan| plan.target == target)
    }

    /// Builder and binder sources
    pub fn target_sources(&self) -> Vec<GeneratedSource> {
        self.builders
            .iter()
            .map(generate_intent_builder)
            .chain(self.binders.iter().map(generate_extra_binder))
            .collect()
    }

    /// Navigator facade and dispatch table
    pub fn aggregate_sources(&self) -> Vec<GeneratedSource> {
        let mut sources = Vec::new();
        if !self.navigator.is_empty() {
            sources.push(generate_navigator(&self.navigator));
        }
        if !self.binders.is_empty() {
            sources.push(generate_dispatch_table(
                &self.navigator.namespace,
                &self.binders,
            ));
        }
        sources
    }
}

/// Drop builders whose state classes would clash, and the builders that
/// start their sequence; returns the targets dropped
fn reject_colliding_states(
    builders: &mut Vec<BuilderPlan>,
    diagnostics: &mut Diagnostics,
) -> Vec<String> {
    let mut rejected = Vec::new();
    builders.retain(|plan| match plan.state_name_collision() {
        Some((first, second, state)) => {
            diagnostics.model(ModelError::StateNameCollision {
                class: plan.target.clone(),
                first,
                second,
                state,
            });
            rejected.push(plan.target.clone());
            false
        }
        None => true,
    });
    let mut delegates = Vec::new();
    builders.retain(|plan| match &plan.initial {
        InitialState::Delegated { ancestor, .. } if rejected.contains(ancestor) => {
            delegates.push(plan.target.clone());
            false
        }
        _ => true,
    });
    rejected.extend(delegates);
    rejected
}

/// Outcome of processing: what was written and what went wrong
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Qualified names of written types, in write order
    pub written: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl Report {
    /// Fail if any error was reported
    pub fn into_result(self) -> CodegenResult<Self> {
        match self.diagnostics.error_count() {
            0 => Ok(self),
            errors => Err(CodegenError::Failed(errors)),
        }
    }
}

/// Runs the pipeline over one fact set
#[derive(Debug, Clone, Default)]
pub struct Processor {
    options: GeneratorOptions,
}

impl Processor {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Build, resolve and lower the model without emitting anything
    pub fn analyze(&self, manifest: &Manifest) -> Analysis {
        let oracle = ManifestOracle::new(&manifest.types);
        let mut diagnostics = Diagnostics::new();

        let mut model = ModelBuilder::new(&oracle)
            .wrap_enabled(self.options.wrap_enabled)
            .debug(self.options.debug)
            .build(manifest, &mut diagnostics);
        resolve(&mut model, &oracle, &mut diagnostics);

        let emission = EmissionSet::from_set(&model);
        let mut builders: Vec<BuilderPlan> = emission
            .roots
            .iter()
            .map(|&id| BuilderPlan::lower(&model, id))
            .chain(
                emission
                    .sequence_only
                    .iter()
                    .map(|&id| BuilderPlan::lower_sequence(&model, id)),
            )
            .collect();
        let binders = model
            .ids()
            .map(|id| InjectionPlan::lower(&model, id))
            .collect();
        let mut navigator = NavigatorPlan::lower(&model, &self.options);
        let rejected = reject_colliding_states(&mut builders, &mut diagnostics);
        navigator
            .entries
            .retain(|entry| !rejected.contains(&entry.target));

        debug!(
            targets = model.len(),
            roots = emission.roots.len(),
            sequence_only = emission.sequence_only.len(),
            "analyzed binding model"
        );

        Analysis {
            model,
            emission,
            builders,
            binders,
            navigator,
            diagnostics,
        }
    }

    /// Single-round processing: every source, aggregates included
    pub fn process(&self, manifest: &Manifest, sink: &mut dyn SourceSink) -> Report {
        let mut session = Session::new(self.options.clone());
        let mut report = session.round(manifest.clone(), sink);
        let last = session.finish(sink);
        report.written.extend(last.written);
        report.diagnostics.extend(last.diagnostics);
        report
    }
}

/// Multi-round processing with incremental facts
#[derive(Debug, Default)]
pub struct Session {
    processor: Processor,
    facts: Manifest,
    /// Qualified name to contents of every type written so far
    written: HashMap<String, String>,
    rounds: usize,
}

impl Session {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            processor: Processor::new(options),
            ..Self::default()
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// All facts seen so far
    pub fn facts(&self) -> &Manifest {
        &self.facts
    }

    /// Fold in new facts, rebuild the model, write builders and binders
    pub fn round(&mut self, facts: Manifest, sink: &mut dyn SourceSink) -> Report {
        self.rounds += 1;
        self.facts.merge(facts);
        let analysis = self.processor.analyze(&self.facts);
        let mut report = Report {
            written: Vec::new(),
            diagnostics: analysis.diagnostics.clone(),
        };
        self.emit(analysis.target_sources(), sink, &mut report);
        info!(
            round = self.rounds,
            written = report.written.len(),
            errors = report.diagnostics.error_count(),
            "processing round complete"
        );
        report
    }

    /// Write the navigator and dispatch table once every target is known
    pub fn finish(&mut self, sink: &mut dyn SourceSink) -> Report {
        let analysis = self.processor.analyze(&self.facts);
        let mut report = Report::default();
        self.emit(analysis.aggregate_sources(), sink, &mut report);
        report
    }

    fn emit(&mut self, sources: Vec<GeneratedSource>, sink: &mut dyn SourceSink, report: &mut Report) {
        for source in sources {
            let name = source.qualified_name();
            match self.written.get(&name) {
                Some(previous) if *previous == source.contents => continue,
                Some(_) => {
                    report.diagnostics.emission(&EmissionError::AlreadyGenerated {
                        origin: source.origin.clone(),
                        type_name: name,
                    });
                    continue;
                }
                None => {}
            }
            match sink.write_source(&source.namespace, &source.type_name, &source.contents) {
                Ok(()) => {
                    report.written.push(name.clone());
                    self.written.insert(name, source.contents);
                }
                Err(err) => report.diagnostics.emission(&EmissionError::Write {
                    origin: source.origin.clone(),
                    type_name: name,
                    source: err,
                }),
            }
        }
    }
}
