// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_session,

        // --- Admin ---
        handlers::admin::list_users,
        handlers::admin::create_user,
        handlers::admin::delete_user,

        // --- Leads ---
        handlers::leads::list_interested,
        handlers::leads::mark_interested,
        handlers::leads::get_interested,
        handlers::leads::update_interested,
        handlers::leads::upcoming_returns,
        handlers::leads::interested_whatsapp,
        handlers::leads::get_lead_profile,
        handlers::leads::lead_whatsapp,

        // --- Search ---
        handlers::search::search_region,
        handlers::search::search_nearby,
        handlers::search::lookup_cnpj,

        // --- Reference ---
        handlers::reference::list_states,
        handlers::reference::list_cities,
        handlers::reference::list_plans,
        handlers::reference::list_internet_providers,

        // --- Location ---
        handlers::location::get_location,
        handlers::location::save_location,

        // --- Client Returns ---
        handlers::client_returns::list_client_returns,
        handlers::client_returns::create_client_return,
        handlers::client_returns::upcoming_client_returns,
        handlers::client_returns::get_client_return,
        handlers::client_returns::delete_client_return,
        handlers::client_returns::client_return_whatsapp,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::create_notification,
        handlers::notifications::pending_notifications,
        handlers::notifications::delete_notification,
        handlers::notifications::notification_stream,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Session,
            models::auth::LoginUserPayload,
            models::auth::LoginResponse,
            models::auth::CreateAccountPayload,
            models::auth::AccountSummary,
            handlers::auth::LoginFailure,

            // --- Leads ---
            models::leads::LeadProfile,
            models::leads::InterestedLead,
            models::leads::InterestedLeadPatch,
            models::leads::ScheduleLeadReturnPayload,
            models::leads::ClientReturn,
            models::leads::ClientReturnPayload,
            models::leads::UpcomingLeadReturn,
            models::leads::UpcomingClientReturn,
            models::leads::ContactLink,

            // --- Lookup ---
            models::lookup::CompanySummary,
            models::lookup::RegionSearchFilters,
            models::lookup::NearbySearchPayload,
            models::lookup::GeoLocation,
            models::lookup::StateInfo,
            models::lookup::CityInfo,

            // --- Notifications ---
            models::notifications::Reminder,
            models::notifications::CreateReminderPayload,
            models::notifications::ReminderAlert,
            models::notifications::PendingReminders,
        )
    ),
    tags(
        (name = "Auth", description = "Login e sessão corrente"),
        (name = "Admin", description = "Contas provisionadas com validade"),
        (name = "Leads", description = "Leads B2B marcados como interessados"),
        (name = "Search", description = "Busca de empresas (CNPJ, região, GPS)"),
        (name = "Reference", description = "Estados, municípios, planos e provedores"),
        (name = "Location", description = "Última localização conhecida"),
        (name = "Client Returns", description = "Retornos agendados com clientes"),
        (name = "Notifications", description = "Lembretes de retorno")
    )
)]
pub struct ApiDoc;
