use super::*;

pub(super) async fn list_persons(State(state): State<Arc<AppState>>) -> Json<Vec<Person>> {
    Json(state.persons.read().await.clone())
}

pub(super) async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Person>, Response> {
    let id = PersonId(id);
    let persons = state.persons.read().await;
    let person = persons
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(not_found)?;
    Ok(Json(person))
}

pub(super) async fn create_person(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<PersonDraft>,
) -> Result<(StatusCode, Json<Person>), Response> {
    validate_draft(&draft).map_err(bad_request)?;

    let mut persons = state.persons.write().await;
    let person = Person {
        id: generate_id(&persons).map_err(internal_error)?,
        name: draft.name,
        number: draft.number,
    };

    let mut next = persons.clone();
    next.push(person.clone());
    persist_persons(&state.data_path, &next).map_err(internal_error)?;
    *persons = next;

    info!("event=person_create id={} name={:?}", person.id, person.name);
    Ok((StatusCode::CREATED, Json(person)))
}

pub(super) async fn update_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<PersonPatch>,
) -> Result<Json<Person>, Response> {
    let id = PersonId(id);
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(bad_request(anyhow::anyhow!("name must not be empty")));
    }

    let mut persons = state.persons.write().await;
    let Some(idx) = persons.iter().position(|p| p.id == id) else {
        return Err(not_found());
    };

    let mut next = persons.clone();
    let person = &mut next[idx];
    if let Some(name) = patch.name {
        person.name = name;
    }
    if let Some(number) = patch.number {
        person.number = number;
    }
    let updated = person.clone();

    persist_persons(&state.data_path, &next).map_err(internal_error)?;
    *persons = next;

    info!("event=person_update id={} name={:?}", updated.id, updated.name);
    Ok(Json(updated))
}

pub(super) async fn delete_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, Response> {
    let id = PersonId(id);
    let mut persons = state.persons.write().await;
    if !persons.iter().any(|p| p.id == id) {
        return Err(not_found());
    }

    let next: Vec<Person> = persons.iter().filter(|p| p.id != id).cloned().collect();
    persist_persons(&state.data_path, &next).map_err(internal_error)?;
    *persons = next;

    info!("event=person_delete id={}", id);
    Ok(StatusCode::OK)
}

fn validate_draft(draft: &PersonDraft) -> Result<()> {
    phonebook::controller::validate_draft(draft)?;
    Ok(())
}
