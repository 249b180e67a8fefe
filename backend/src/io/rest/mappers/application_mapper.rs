use crate::domain::commands::applications::SubmitApplicationCommand;
use crate::domain::models::Application;
use shared::{ApplicationDto, SubmitApplicationRequest};

pub struct ApplicationMapper;

impl ApplicationMapper {
    pub fn to_command(request: SubmitApplicationRequest) -> SubmitApplicationCommand {
        SubmitApplicationCommand {
            name: request.name,
            phone: request.phone,
            id_number: request.id_number,
            loan_amount: request.loan_amount,
            livestock_type: request.livestock_type,
            livestock_count: request.livestock_count,
            estimated_value: request.estimated_value,
            location: request.location,
            additional_info: request.additional_info,
            photos: request.photos,
        }
    }

    pub fn to_dto(application: &Application) -> ApplicationDto {
        ApplicationDto {
            id: application.id,
            name: application.name.clone(),
            phone: application.phone.clone(),
            id_number: application.id_number.clone(),
            loan_amount: application.loan_amount,
            livestock_type: application.livestock_type.clone(),
            livestock_count: application.livestock_count,
            estimated_value: application.estimated_value,
            location: application.location.clone(),
            additional_info: application.additional_info.clone(),
            status: application.status,
            date: application.date,
            photos: application.photos.clone(),
        }
    }
}
