use crate::domain::notifications::Notification;
use crate::domain::queries::DashboardStats;
use shared::{DashboardStatsDto, NotificationDto};

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_dto(stats: DashboardStats) -> DashboardStatsDto {
        DashboardStatsDto {
            total_clients: stats.total_clients,
            total_lent: stats.total_lent,
            total_received: stats.total_received,
            total_revenue: stats.total_revenue,
            pending_applications: stats.pending_applications,
            due_today: stats.due_today,
            overdue: stats.overdue,
        }
    }

    pub fn notification_to_dto(notification: Notification) -> NotificationDto {
        NotificationDto {
            kind: notification.kind,
            message: notification.message,
            created_at: notification.created_at,
        }
    }
}
