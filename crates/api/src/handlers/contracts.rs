//! Handlers for the `/contracts` resource and the invoices issued on each
//! contract.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cfomatch_core::activity::{self, entity};
use cfomatch_core::contract::{
    authorize_transition, validate_terms, validate_transition, ContractParty, ContractStatus,
};
use cfomatch_core::error::CoreError;
use cfomatch_core::invoice::{compute_amounts, invoice_number, validate_dates};
use cfomatch_core::scout::{party_of, ScoutStatus};
use cfomatch_core::types::DbId;
use cfomatch_core::upload::UploadPurpose;
use cfomatch_db::models::activity::CreateActivity;
use cfomatch_db::models::contract::{
    Contract, ContractListParams, CreateContract, CreateContractRequest, UpdateContractStatus,
};
use cfomatch_db::models::invoice::{
    CreateInvoice, CreateInvoiceRequest, Invoice, InvoiceListParams,
};
use cfomatch_db::repositories::{ContractRepo, InvoiceRepo, ScoutRepo, StoredFileRepo};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::activities;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireCfo, RequireCompany};
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

fn contract_party(contract: &Contract, user_id: DbId) -> Option<ContractParty> {
    if contract.company_user_id == user_id {
        Some(ContractParty::Company)
    } else if contract.cfo_user_id == user_id {
        Some(ContractParty::Cfo)
    } else {
        None
    }
}

/// Load a contract visible to the caller: either party, or any admin.
async fn load_visible_contract(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Contract> {
    let contract = ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contract",
            id,
        }))?;
    if !user.is_admin() && contract_party(&contract, user.user_id).is_none() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not a party to this contract".into(),
        )));
    }
    Ok(contract)
}

/// GET /api/v1/contracts
///
/// Parties see their own contracts; admins see all.
pub async fn list_contracts(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<ContractListParams>,
) -> AppResult<Json<PaginatedResponse<Contract>>> {
    let party = (!user.is_admin()).then_some(user.user_id);
    let (items, total) = ContractRepo::list(&state.pool, party, &params).await?;
    Ok(Json(PaginatedResponse::new(items, &params.page_params(), total)))
}

/// POST /api/v1/contracts
///
/// The company side proposes a contract off an accepted scout. The contract
/// starts `pending` until the CFO activates it.
pub async fn create_contract(
    State(state): State<AppState>,
    RequireCompany(user): RequireCompany,
    AppJson(input): AppJson<CreateContractRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Contract>>)> {
    validate_terms(&input.title, input.monthly_fee, input.start_date, input.end_date)?;

    let scout = ScoutRepo::find_by_id(&state.pool, input.scout_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scout",
            id: input.scout_id,
        }))?;
    if party_of(scout.sender_id, scout.receiver_id, user.user_id).is_none() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not a party to this scout".into(),
        )));
    }
    if scout.status != ScoutStatus::Accepted {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Contracts can only be created from an accepted scout (scout is {})",
            scout.status
        ))));
    }

    // Scouts always pair a company with a CFO, so the other party is the CFO.
    let cfo_user_id = if scout.sender_id == user.user_id {
        scout.receiver_id
    } else {
        scout.sender_id
    };

    let contract = ContractRepo::create(
        &state.pool,
        &CreateContract {
            company_user_id: user.user_id,
            cfo_user_id,
            scout_id: Some(scout.id),
            title: input.title.trim().to_string(),
            description: input.description,
            monthly_fee: input.monthly_fee,
            start_date: input.start_date,
            end_date: input.end_date,
        },
    )
    .await?;

    tracing::info!(contract_id = contract.id, scout_id = scout.id, "Contract created");
    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::CONTRACT_CREATED)
            .entity(entity::CONTRACT, contract.id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(contract))))
}

/// GET /api/v1/contracts/{id}
pub async fn get_contract(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Contract>>> {
    let contract = load_visible_contract(&state, &user, id).await?;
    Ok(Json(DataResponse::new(contract)))
}

/// PATCH /api/v1/contracts/{id}/status
///
/// `pending → active` (CFO only), `pending|active → cancelled` and
/// `active → completed` (either party or admin).
pub async fn update_contract_status(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateContractStatus>,
) -> AppResult<Json<DataResponse<Contract>>> {
    let next: ContractStatus = input.status.parse()?;
    let contract = load_visible_contract(&state, &user, id).await?;

    authorize_transition(next, contract_party(&contract, user.user_id), user.is_admin())?;
    validate_transition(contract.status, next)?;

    let updated = ContractRepo::update_status(&state.pool, id, contract.status, next)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Contract {id} was modified concurrently; reload and retry"
            )))
        })?;

    tracing::info!(
        contract_id = id,
        from = %contract.status,
        to = %next,
        user_id = user.user_id,
        "Contract status changed"
    );
    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::CONTRACT_STATUS_CHANGED)
            .entity(entity::CONTRACT, id)
            .metadata(json!({ "from": contract.status, "to": next })),
    )
    .await;

    Ok(Json(DataResponse::new(updated)))
}

/// GET /api/v1/contracts/{id}/invoices
pub async fn list_contract_invoices(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<InvoiceListParams>,
) -> AppResult<Json<PaginatedResponse<Invoice>>> {
    let contract = load_visible_contract(&state, &user, id).await?;
    let (items, total) = InvoiceRepo::list_by_contract(&state.pool, contract.id, &params).await?;
    Ok(Json(PaginatedResponse::new(items, &params.page_params(), total)))
}

/// POST /api/v1/contracts/{id}/invoices
///
/// The CFO on an active contract bills the company. Tax and total are
/// computed server-side.
pub async fn create_invoice(
    State(state): State<AppState>,
    RequireCfo(user): RequireCfo,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateInvoiceRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Invoice>>)> {
    let contract = load_visible_contract(&state, &user, id).await?;
    if contract.cfo_user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the contract's CFO may issue invoices".into(),
        )));
    }
    if contract.status != ContractStatus::Active {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Invoices can only be issued on an active contract (contract is {})",
            contract.status
        ))));
    }

    validate_dates(input.issue_date, input.due_date)?;
    let amounts = compute_amounts(input.amount)?;

    let pdf_path = match input.pdf_file_id {
        Some(file_id) => {
            let file = StoredFileRepo::find_by_id(&state.pool, file_id)
                .await?
                .filter(|f| f.owner_id == user.user_id)
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "File",
                    id: file_id,
                }))?;
            if file.purpose != UploadPurpose::Document {
                return Err(AppError::Core(CoreError::Validation(
                    "pdf_file_id must reference a document upload".into(),
                )));
            }
            Some(file.storage_path)
        }
        None => None,
    };

    let seq = InvoiceRepo::count_for_contract(&state.pool, contract.id).await? + 1;
    let invoice = InvoiceRepo::create(
        &state.pool,
        &CreateInvoice {
            contract_id: contract.id,
            invoice_number: invoice_number(contract.id, input.issue_date, seq),
            amount: amounts.amount,
            tax_amount: amounts.tax_amount,
            total_amount: amounts.total_amount,
            issue_date: input.issue_date,
            due_date: input.due_date,
            pdf_path,
        },
    )
    .await?;

    tracing::info!(
        invoice_id = invoice.id,
        contract_id = contract.id,
        number = %invoice.invoice_number,
        "Invoice issued"
    );
    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::INVOICE_ISSUED)
            .entity(entity::INVOICE, invoice.id)
            .metadata(json!({ "contract_id": contract.id, "total_amount": invoice.total_amount })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(invoice))))
}
