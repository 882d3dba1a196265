#![cfg(feature = "memory")]

use std::sync::Arc;
use std::thread;

use bson::{Bson, doc};
use marquee_pipeline::{Collections, JoinShape, RoleFilter, Stage, compose};
use marquee_store::{MemoryStore, PipelineStore, StoreError};

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .insert_many(
            "principals_mapping",
            vec![
                doc! { "_id": 1, "tconst": "tt0000001", "nconst": "nm0000001", "category": "actor" },
                doc! { "_id": 2, "tconst": "tt0000001", "nconst": "nm0000002", "category": "director" },
                doc! { "_id": 3, "tconst": "tt0000002", "nconst": "nm0000001", "category": "actor" },
                doc! { "_id": 4, "tconst": "tt9999999", "nconst": "nm0000001", "category": "self" },
            ],
        )
        .unwrap();
    store
        .insert_many(
            "titles",
            vec![
                doc! { "_id": 10, "tconst": "tt0000001", "primaryTitle": "Carmencita" },
                doc! { "_id": 11, "tconst": "tt0000002", "primaryTitle": "Le clown et ses chiens" },
            ],
        )
        .unwrap();
    store
        .insert_many(
            "names",
            vec![
                doc! { "_id": 20, "nconst": "nm0000001", "primaryName": "Fred Astaire" },
                doc! { "_id": 21, "nconst": "nm0000002", "primaryName": "Lauren Bacall" },
            ],
        )
        .unwrap();
    store
}

#[test]
fn person_titles_projects_first_joined_title() {
    let store = seeded_store();
    let agg = compose(JoinShape::PersonTitles, "nm0000001", &Collections::default());
    let docs = store.aggregate(&agg.collection, &agg.stages).unwrap();

    assert_eq!(docs.len(), 3);
    assert_eq!(
        docs[0],
        doc! { "title_info": { "_id": 10, "tconst": "tt0000001", "primaryTitle": "Carmencita" } }
    );
    assert_eq!(docs[1].get_document("title_info").unwrap().get_str("tconst").unwrap(), "tt0000002");
    // tt9999999 has no title document: the projection drops the field
    assert!(docs[2].is_empty());
}

#[test]
fn title_people_joins_person_array() {
    let store = seeded_store();
    let agg = compose(
        JoinShape::TitlePrincipals(RoleFilter::All),
        "tt0000001",
        &Collections::default(),
    );
    let docs = store.aggregate(&agg.collection, &agg.stages).unwrap();

    assert_eq!(docs.len(), 2);
    for doc in &docs {
        let person = doc.get_array("person").unwrap();
        assert_eq!(person.len(), 1);
        assert_eq!(
            person[0].as_document().unwrap().get("nconst"),
            doc.get("nconst")
        );
    }
}

#[test]
fn cast_and_crew_split_principals() {
    let store = seeded_store();
    let run = |role| {
        let agg = compose(JoinShape::TitlePrincipals(role), "tt0000001", &Collections::default());
        store
            .aggregate(&agg.collection, &agg.stages)
            .unwrap()
            .into_iter()
            .map(|d| d.get("nconst").cloned().unwrap())
            .collect::<Vec<Bson>>()
    };

    assert_eq!(run(RoleFilter::Cast), vec![Bson::from("nm0000001")]);
    assert_eq!(run(RoleFilter::Crew), vec![Bson::from("nm0000002")]);
}

#[test]
fn unknown_collection_reads_as_empty() {
    let store = MemoryStore::new();
    let agg = compose(JoinShape::PersonTitles, "nm0000001", &Collections::default());
    assert!(store.aggregate(&agg.collection, &agg.stages).unwrap().is_empty());
}

#[test]
fn empty_field_path_is_invalid_pipeline() {
    let store = seeded_store();
    let stages = [Stage::Match(marquee_pipeline::Filter::eq("", "x"))];
    let err = store.aggregate("titles", &stages).unwrap_err();
    assert!(matches!(err, StoreError::InvalidPipeline(_)));
}

#[test]
fn insert_many_appends_and_reports_count() {
    let store = MemoryStore::new();
    assert_eq!(store.insert_many("names", vec![doc! { "nconst": "a" }]).unwrap(), 1);
    assert_eq!(
        store
            .insert_many("names", vec![doc! { "nconst": "b" }, doc! { "nconst": "c" }])
            .unwrap(),
        2
    );
    let docs = store.aggregate("names", &[]).unwrap();
    assert_eq!(docs.len(), 3);
}

#[test]
fn concurrent_readers_see_consistent_snapshots() {
    let store = Arc::new(seeded_store());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let agg = compose(JoinShape::PersonTitles, "nm0000001", &Collections::default());
                store.aggregate(&agg.collection, &agg.stages).unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
}
