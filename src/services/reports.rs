//! Dashboard and reporting aggregates

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    clock::Clock,
    models::{
        report::{
            CategoryCount, Dashboard, ReportSummary, Reports, StatusCount, TeamCount, TypeCount,
        },
        request::{MaintenanceRequest, RequestStatus, RequestType},
    },
    repository::Repository,
};

const RECENT_REQUESTS: usize = 5;
const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl ReportsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn dashboard(&self) -> Dashboard {
        let now = self.clock.now();
        self.repository
            .read(|state| {
                let mut requests: Vec<MaintenanceRequest> = state
                    .requests
                    .values()
                    .cloned()
                    .map(|r| r.evaluated_at(now))
                    .collect();

                let active_requests = requests.iter().filter(|r| !r.status.is_closed()).count();
                let overdue_requests = requests.iter().filter(|r| r.is_overdue).count();

                requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                requests.truncate(RECENT_REQUESTS);

                Dashboard {
                    total_equipment: state.equipment.len(),
                    active_requests,
                    maintenance_teams: state.teams.len(),
                    overdue_requests,
                    recent_requests: requests,
                }
            })
            .await
    }

    pub async fn reports(&self) -> Reports {
        let now = self.clock.now();
        self.repository
            .read(|state| {
                let requests: Vec<MaintenanceRequest> = state
                    .requests
                    .values()
                    .cloned()
                    .map(|r| r.evaluated_at(now))
                    .collect();

                let mut requests_per_team: Vec<TeamCount> = state
                    .teams
                    .values()
                    .map(|team| TeamCount {
                        team_id: team.id.clone(),
                        name: team.name.clone(),
                        count: requests
                            .iter()
                            .filter(|r| r.maintenance_team_id == team.id)
                            .count(),
                    })
                    .collect();
                requests_per_team.sort_by(|a, b| b.count.cmp(&a.count));

                let mut categories: IndexMap<&str, usize> = IndexMap::new();
                for request in &requests {
                    let category = request.category.as_deref().unwrap_or(UNCATEGORIZED);
                    *categories.entry(category).or_default() += 1;
                }
                let mut requests_per_category: Vec<CategoryCount> = categories
                    .into_iter()
                    .map(|(category, count)| CategoryCount {
                        category: category.to_string(),
                        count,
                    })
                    .collect();
                requests_per_category.sort_by(|a, b| b.count.cmp(&a.count));

                let count_status =
                    |status: RequestStatus| requests.iter().filter(|r| r.status == status).count();

                let status_distribution = RequestStatus::ALL
                    .iter()
                    .map(|&status| StatusCount {
                        status,
                        count: count_status(status),
                    })
                    .collect();

                let type_distribution = RequestType::ALL
                    .iter()
                    .map(|&request_type| TypeCount {
                        request_type,
                        count: requests
                            .iter()
                            .filter(|r| r.request_type == request_type)
                            .count(),
                    })
                    .collect();

                let summary = ReportSummary {
                    total: requests.len(),
                    in_progress: count_status(RequestStatus::InProgress),
                    repaired: count_status(RequestStatus::Repaired),
                    overdue: requests.iter().filter(|r| r.is_overdue).count(),
                };

                Reports {
                    requests_per_team,
                    requests_per_category,
                    status_distribution,
                    type_distribution,
                    summary,
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::MockClock, repository::SeedData};
    use chrono::{TimeZone, Utc};

    fn service() -> ReportsService {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        ReportsService::new(Repository::with_seed(SeedData::demo().unwrap()), Arc::new(clock))
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let dashboard = service().dashboard().await;
        assert_eq!(dashboard.total_equipment, 10);
        assert_eq!(dashboard.active_requests, 4);
        assert_eq!(dashboard.maintenance_teams, 15);
        assert_eq!(dashboard.overdue_requests, 3);

        let recent: Vec<_> = dashboard.recent_requests.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(recent, vec!["2", "5", "4", "3", "1"]);
    }

    #[tokio::test]
    async fn test_reports_breakdowns() {
        let reports = service().reports().await;

        assert_eq!(reports.requests_per_team.len(), 15);
        assert_eq!(reports.requests_per_team[0].name, "Mechanics");
        assert_eq!(reports.requests_per_team[0].count, 2);

        assert_eq!(reports.requests_per_category[0].category, "Machinery");
        assert_eq!(reports.requests_per_category[0].count, 3);

        let types: Vec<_> = reports
            .type_distribution
            .iter()
            .map(|t| (t.request_type, t.count))
            .collect();
        assert_eq!(
            types,
            vec![(RequestType::Corrective, 2), (RequestType::Preventive, 3)]
        );

        let scrap = reports
            .status_distribution
            .iter()
            .find(|s| s.status == RequestStatus::Scrap)
            .unwrap();
        assert_eq!(scrap.count, 0);

        assert_eq!(
            reports.summary,
            ReportSummary {
                total: 5,
                in_progress: 2,
                repaired: 1,
                overdue: 3,
            }
        );
    }
}
