//! Score command

use super::read_document;
use crate::{output, output::OutputFormat, ScoreArgs};
use riskgate_common::RiskGateResult;
use riskgate_engine::{score, RiskInput};
use riskgate_signals::{LoginTelemetry, SignalNormalizer, UserBaseline};

pub fn handle(args: ScoreArgs, format: OutputFormat) -> anyhow::Result<()> {
    let input = build_input(&args)?;
    let verdict = score(&input);
    format.emit(&verdict, output::print_verdict)
}

fn build_input(args: &ScoreArgs) -> RiskGateResult<RiskInput> {
    let mut input = if let Some(path) = &args.telemetry {
        let telemetry: LoginTelemetry = read_document(path)?;
        let baseline = match &args.baseline {
            Some(path) => read_document(path)?,
            None => UserBaseline::default(),
        };
        SignalNormalizer::default().normalize(&telemetry, &baseline)?
    } else if let Some(path) = &args.file {
        read_document(path)?
    } else {
        RiskInput::clean()
    };

    for signal in &args.signals {
        input.enable(*signal);
    }
    if let Some(n) = args.failed_attempts {
        input.failed_attempts = n;
    }
    Ok(input)
}
