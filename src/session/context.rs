//! Caller-owned analysis state threaded through each pipeline stage.

use crate::domain::{Decimal, RawTrade, ResolvedSide, SideSelection};
use crate::engine::{analyze, Analysis, AnalysisError, SideResolver};
use serde::Serialize;

pub const UNKNOWN_MARKET: &str = "Unknown Market";

/// How a resolved side was settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideDecision {
    pub resolved_side: ResolvedSide,
    pub auto_inferred: bool,
    /// Price of the trade inference was based on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_outcome: Option<String>,
}

/// State of one analysis: loaded trades, chosen resolution and the last result.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    resolver: SideResolver,
    raw_trades: Vec<RawTrade>,
    market_title: String,
    condition_id: String,
    resolved_side: Option<ResolvedSide>,
    analysis: Option<Analysis>,
}

impl AnalysisContext {
    pub fn new(resolver: SideResolver) -> Self {
        Self {
            resolver,
            raw_trades: Vec::new(),
            market_title: UNKNOWN_MARKET.to_string(),
            condition_id: String::new(),
            resolved_side: None,
            analysis: None,
        }
    }

    /// Replace the loaded trades.
    ///
    /// Drops any previous analysis and tries to infer the resolved side; a
    /// failed inference leaves the previous choice in place.
    pub fn load_trades(
        &mut self,
        trades: Vec<RawTrade>,
        title: Option<String>,
        condition_id: Option<String>,
    ) {
        self.market_title = title
            .filter(|t| !t.trim().is_empty())
            .or_else(|| trades.first().and_then(|t| t.title.clone()))
            .unwrap_or_else(|| UNKNOWN_MARKET.to_string());
        self.condition_id = condition_id
            .or_else(|| trades.first().and_then(|t| t.condition_id.clone()))
            .unwrap_or_default();
        self.raw_trades = trades;
        self.analysis = None;

        if let Some(side) = self.resolver.infer(&self.raw_trades).side {
            self.resolved_side = Some(side);
        }
    }

    /// Apply an explicit or automatic resolved-side choice.
    pub fn select_side(&mut self, selection: SideSelection) -> Result<SideDecision, AnalysisError> {
        let decision = match selection {
            SideSelection::Explicit(side) => SideDecision {
                resolved_side: side,
                auto_inferred: false,
                reference_price: None,
                reference_outcome: None,
            },
            SideSelection::Auto => {
                if self.raw_trades.is_empty() {
                    return Err(AnalysisError::EmptyInput);
                }
                let inference = self.resolver.infer(&self.raw_trades);
                let side = inference.side.ok_or(AnalysisError::InferenceFailure)?;
                let reference = inference.reference;
                SideDecision {
                    resolved_side: side,
                    auto_inferred: true,
                    reference_price: reference.as_ref().map(|t| t.price),
                    reference_outcome: reference.and_then(|t| t.outcome),
                }
            }
        };

        self.resolved_side = Some(decision.resolved_side);
        Ok(decision)
    }

    /// Run the engine over the loaded trades under the chosen resolution.
    pub fn run_analysis(&mut self) -> Result<&Analysis, AnalysisError> {
        if self.raw_trades.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        let side = self.resolved_side.ok_or(AnalysisError::UnresolvedSide)?;
        let analysis = analyze(&self.raw_trades, side)?;
        Ok(self.analysis.insert(analysis))
    }

    pub fn raw_trades(&self) -> &[RawTrade] {
        &self.raw_trades
    }

    pub fn market_title(&self) -> &str {
        &self.market_title
    }

    pub fn condition_id(&self) -> &str {
        &self.condition_id
    }

    pub fn resolved_side(&self) -> Option<ResolvedSide> {
        self.resolved_side
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::new(SideResolver::default())
    }
}
