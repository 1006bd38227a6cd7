use chrono::Utc;
use diesel::prelude::*;

use crate::domain::machine::{Machine, MachineDocument, NewMachine};
use crate::domain::types::MachineId;
use crate::models::machine::{Machine as DbMachine, MachineRow};
use crate::normalizer::machine_from_document;
use crate::repository::{
    DieselRepository, MachineListQuery, MachineReader, MachineWriter, RepositoryResult,
    UnreadableMachine, new_record_id,
};

fn hydrate(row: DbMachine) -> RepositoryResult<Machine> {
    let document = MachineDocument::try_from(row)?;
    Ok(machine_from_document(document, Utc::now().naive_utc())?)
}

impl MachineReader for DieselRepository {
    fn get_machine_by_id(&self, id: &MachineId) -> RepositoryResult<Option<Machine>> {
        use crate::schema::machines;

        let mut conn = self.conn()?;

        let machine = machines::table
            .filter(machines::id.eq(id.as_str()))
            .first::<DbMachine>(&mut conn)
            .optional()?;

        machine.map(hydrate).transpose()
    }

    fn list_machines(&self, query: MachineListQuery) -> RepositoryResult<Vec<Machine>> {
        use crate::schema::machines;

        let mut conn = self.conn()?;

        let mut items = machines::table
            .into_boxed::<diesel::sqlite::Sqlite>()
            .order(machines::created_at.asc());
        if let Some(owner_id) = &query.owner_id {
            items = items.filter(machines::owner_id.eq(owner_id.as_str()));
        }

        // Taxonomy filters run after hydration so legacy rows that only carry
        // the singular columns still match.
        let machines = items
            .load::<DbMachine>(&mut conn)?
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                match hydrate(row) {
                    Ok(machine) => Some(machine),
                    Err(e) => {
                        log::warn!("Skipping unreadable machine {id}: {e}");
                        None
                    }
                }
            })
            .filter(|machine| query.matches(machine))
            .collect();

        Ok(machines)
    }

    fn list_machine_documents(
        &self,
    ) -> RepositoryResult<Vec<Result<MachineDocument, UnreadableMachine>>> {
        use crate::schema::machines;

        let mut conn = self.conn()?;

        let documents = machines::table
            .order(machines::created_at.asc())
            .load::<DbMachine>(&mut conn)?
            .into_iter()
            .map(|row| {
                let id = row.id.clone();
                let name = row.name.clone();
                MachineDocument::try_from(row)
                    .map_err(|error| UnreadableMachine { id, name, error })
            })
            .collect();

        Ok(documents)
    }
}

impl MachineWriter for DieselRepository {
    fn create_machine(&self, machine: &NewMachine) -> RepositoryResult<MachineId> {
        use crate::schema::machines;

        let mut conn = self.conn()?;
        let id = MachineId::new(new_record_id())?;
        let row = MachineRow::from_new(&id, machine)?;

        diesel::insert_into(machines::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(id)
    }

    fn update_machine(&self, machine: &Machine) -> RepositoryResult<usize> {
        use crate::schema::machines;

        let mut conn = self.conn()?;
        let row = MachineRow::from_machine(machine)?;

        let affected = diesel::update(machines::table.filter(machines::id.eq(machine.id.as_str())))
            .set(&row)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_machines(&self, machines: &[Machine]) -> RepositoryResult<usize> {
        use crate::schema::machines as machines_table;

        let rows = machines
            .iter()
            .map(MachineRow::from_machine)
            .collect::<RepositoryResult<Vec<_>>>()?;

        let mut conn = self.conn()?;

        conn.transaction(|conn| {
            let mut affected = 0;
            for row in &rows {
                affected += diesel::update(
                    machines_table::table.filter(machines_table::id.eq(row.id.as_str())),
                )
                .set(row)
                .execute(conn)?;
            }
            Ok(affected)
        })
    }

    fn delete_machine(&self, id: &MachineId) -> RepositoryResult<usize> {
        use crate::schema::{machines, product_videos};

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            diesel::delete(product_videos::table.filter(product_videos::product_id.eq(id.as_str())))
                .execute(conn)?;

            diesel::delete(machines::table.filter(machines::id.eq(id.as_str()))).execute(conn)
        })?;

        Ok(affected)
    }
}
