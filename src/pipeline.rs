//! Deal pipeline board: grouping by stage, summary stats and stage moves.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity;
use crate::models::deal::{Deal, Stage};
use crate::store::{Owner, RecordStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageColumn {
    pub stage: Stage,
    pub title: &'static str,
    pub deals: Vec<Deal>,
}

impl StageColumn {
    pub fn total_value(&self) -> f64 {
        self.deals.iter().map(Deal::value_or_zero).sum()
    }
}

/// One column per stage in display order. Deals whose stored stage is not a
/// known stage appear in no column.
pub fn group_by_stage(deals: &[Deal]) -> Vec<StageColumn> {
    Stage::ALL
        .into_iter()
        .map(|stage| StageColumn {
            stage,
            title: stage.title(),
            deals: deals.iter().filter(|d| d.stage() == Some(stage)).cloned().collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub total_value: f64,
    pub won_value: f64,
    /// Mean value over all deals, rounded; 0 when there are none.
    pub average_deal_size: f64,
    /// Deals with 0 < probability < 100.
    pub active_deals: usize,
}

impl PipelineStats {
    pub fn from_deals(deals: &[Deal]) -> Self {
        let total_value: f64 = deals.iter().map(Deal::value_or_zero).sum();
        let won_value = deals
            .iter()
            .filter(|d| d.stage() == Some(Stage::Won))
            .map(Deal::value_or_zero)
            .sum();
        let average_deal_size = if deals.is_empty() {
            0.0
        } else {
            (total_value / deals.len() as f64).round()
        };
        PipelineStats {
            total_value,
            won_value,
            average_deal_size,
            active_deals: deals.iter().filter(|d| d.is_active()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub columns: Vec<StageColumn>,
    pub stats: PipelineStats,
}

impl Board {
    pub fn new(deals: &[Deal]) -> Self {
        Board { columns: group_by_stage(deals), stats: PipelineStats::from_deals(deals) }
    }
}

pub async fn load_board(store: &dyn RecordStore, owner: Uuid) -> Result<Board, AppError> {
    let deals = store.list_deals(owner).await?;
    Ok(Board::new(&deals))
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageMove {
    /// Target equals the current stage; nothing was written.
    Unchanged,
    /// Stage written; `deals` is the owner's freshly re-fetched list.
    Moved { deals: Vec<Deal> },
}

/// Move one of `owner`'s deals to `target`.
///
/// Writes the stage column only, then re-fetches the owner's deals. A rejected
/// write leaves the deal as it was and returns the backend error.
pub async fn move_deal(
    store: &dyn RecordStore,
    owner: &Owner,
    deal_id: Uuid,
    target: Stage,
) -> Result<StageMove, AppError> {
    let deal = store.find_deal(owner.user_id, deal_id).await?.ok_or(AppError::NotFound)?;
    if deal.stage() == Some(target) {
        return Ok(StageMove::Unchanged);
    }
    if !store.update_deal_stage(owner.user_id, deal_id, target).await? {
        return Err(AppError::NotFound);
    }

    activity::record(
        store,
        owner,
        "deal",
        format!("Deal moved to {}", target.title()),
        Some(deal.title.clone()),
    )
    .await;

    let deals = store.list_deals(owner.user_id).await?;
    Ok(StageMove::Moved { deals })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::deal::DealPayload;
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn deal(stage: &str, value: Option<f64>, probability: i32) -> Deal {
        let now = Utc::now();
        Deal {
            id: Uuid::new_v4(),
            title: format!("{stage} deal"),
            description: None,
            value,
            currency: "USD".into(),
            stage: stage.into(),
            probability,
            priority: "medium".into(),
            close_date: None,
            contact_id: None,
            company_id: None,
            assigned_to: None,
            source: None,
            deal_type: None,
            notes: None,
            tags: Vec::new(),
            competitors: Vec::new(),
            next_steps: None,
            loss_reason: None,
            won_at: None,
            created_by: Uuid::nil(),
            company: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn grouping_partitions_known_stages_only() {
        let deals = vec![
            deal("lead-in", Some(10.0), 20),
            deal("won", Some(5.0), 100),
            deal("archived", Some(7.0), 0),
            deal("lead-in", None, 20),
            deal("Won", Some(1.0), 100),
        ];
        let columns = group_by_stage(&deals);
        assert_eq!(columns.len(), 7);
        assert_eq!(columns.iter().map(|c| c.stage).collect::<Vec<_>>(), Stage::ALL.to_vec());

        let flattened: Vec<&Deal> = columns.iter().flat_map(|c| c.deals.iter()).collect();
        let known: Vec<&Deal> = deals.iter().filter(|d| d.stage().is_some()).collect();
        assert_eq!(flattened.len(), known.len());
        for d in known {
            assert!(flattened.contains(&d));
        }
        assert_eq!(columns[0].deals.len(), 2);
        assert_eq!(columns[0].total_value(), 10.0);
    }

    #[test]
    fn stats_on_empty_pipeline_are_zero() {
        assert_eq!(PipelineStats::from_deals(&[]), PipelineStats::default());
    }

    #[test]
    fn stats_round_average_and_count_active() {
        let deals = vec![deal("won", Some(100.0), 100), deal("proposal", Some(51.0), 60), deal("lost", None, 0)];
        let stats = PipelineStats::from_deals(&deals);
        assert_eq!(stats.total_value, 151.0);
        assert_eq!(stats.won_value, 100.0);
        assert_eq!(stats.average_deal_size, 50.0);
        assert_eq!(stats.active_deals, 1);
    }

    #[tokio::test]
    async fn moving_to_current_stage_writes_nothing() {
        let store = MemoryStore::new();
        let owner = Owner { user_id: Uuid::new_v4(), company: Some("Acme".into()) };
        let d = store.insert_deal(&owner, &DealPayload::new("Acme", Stage::Proposal)).await.unwrap();
        let before = store.operations();
        let result = move_deal(&store, &owner, d.id, Stage::Proposal).await.unwrap();
        assert_eq!(result, StageMove::Unchanged);
        assert_eq!(store.operations() - before, 1);
    }

    #[tokio::test]
    async fn rejected_move_leaves_deal_unchanged() {
        let store = MemoryStore::new();
        let owner = Owner { user_id: Uuid::new_v4(), company: Some("Acme".into()) };
        let d = store.insert_deal(&owner, &DealPayload::new("Acme", Stage::LeadIn)).await.unwrap();
        store.reject_writes("permission denied for table deals");
        let err = move_deal(&store, &owner, d.id, Stage::Won).await.unwrap_err();
        assert_eq!(err.to_string(), "permission denied for table deals");
        store.accept_writes();
        assert_eq!(store.find_deal(owner.user_id, d.id).await.unwrap().unwrap(), d);
    }

    #[tokio::test]
    async fn unknown_deal_is_not_found() {
        let store = MemoryStore::new();
        let owner = Owner { user_id: Uuid::new_v4(), company: None };
        let err = move_deal(&store, &owner, Uuid::new_v4(), Stage::Won).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
