use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::{CatalogRepository, CoreError, EventInfo, Speaker, SpeakerKey, Talk};

/// Immutable in-memory catalog built once at startup.
///
/// Speakers keep their fixture order; `index` maps keys to positions for
/// lookups.
#[derive(Clone, Debug)]
pub struct FixtureRepo {
    event: EventInfo,
    speakers: Vec<Speaker>,
    index: HashMap<SpeakerKey, usize>,
    talks: Vec<Talk>,
}

/// On-disk fixture shape: `{ "event": {..}, "speakers": {"s1": {..}}, "talks": [..] }`.
#[derive(Debug, Deserialize)]
pub struct FixtureFile {
    pub event: EventInfo,
    /// Entries in file order. Repeated keys are kept so `FixtureRepo::new`
    /// can reject them.
    #[serde(default, deserialize_with = "ordered_entries")]
    pub speakers: Vec<(SpeakerKey, Speaker)>,
    #[serde(default)]
    pub talks: Vec<Talk>,
}

fn ordered_entries<'de, D, K, V>(deserializer: D) -> Result<Vec<(K, V)>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for EntriesVisitor<K, V>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
    {
        type Value = Vec<(K, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of speaker key to speaker")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

impl FixtureRepo {
    /// Build a store from explicit data. Speaker keys and talk ids must be unique.
    pub fn new<I>(event: EventInfo, speakers: I, talks: Vec<Talk>) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (SpeakerKey, Speaker)>,
    {
        let speakers: Vec<(SpeakerKey, Speaker)> = speakers.into_iter().collect();

        let mut seen_keys = HashSet::new();
        for (key, _) in &speakers {
            if !seen_keys.insert(key) {
                return Err(CoreError::DuplicateSpeaker(key.as_str().to_string()));
            }
        }
        let mut seen_ids = HashSet::new();
        for talk in &talks {
            if !seen_ids.insert(talk.id.as_str()) {
                return Err(CoreError::DuplicateTalk(talk.id.clone()));
            }
        }

        Ok(Self::assemble(event, speakers, talks))
    }

    fn assemble(event: EventInfo, speakers: Vec<(SpeakerKey, Speaker)>, talks: Vec<Talk>) -> Self {
        let mut index = HashMap::with_capacity(speakers.len());
        let mut ordered = Vec::with_capacity(speakers.len());
        for (pos, (key, speaker)) in speakers.into_iter().enumerate() {
            index.insert(key, pos);
            ordered.push(speaker);
        }
        Self {
            event,
            speakers: ordered,
            index,
            talks,
        }
    }

    /// `(talk id, speaker key)` pairs whose key is not in the store.
    pub fn dangling_references(&self) -> Vec<(String, SpeakerKey)> {
        self.talks
            .iter()
            .flat_map(|t| t.speakers.iter().map(move |k| (t, k)))
            .filter(|(_, k)| !self.index.contains_key(*k))
            .map(|(t, k)| (t.id.clone(), k.clone()))
            .collect()
    }

    /// The built-in "Google Cloud Tech Day 2025" data set.
    pub fn tech_day() -> Self {
        let event = EventInfo {
            title: "Google Cloud Tech Day 2025".into(),
            date: "15 de Noviembre, 2025".into(),
            location: "Centro de Convenciones Tech, Ciudad de México".into(),
            description:
                "Un día completo dedicado a explorar las últimas innovaciones en Google Cloud Platform."
                    .into(),
        };

        let speakers = [
            ("s1", "Ana García", "Cloud Architect", "fake-ana-garcia"),
            ("s2", "Carlos López", "Data Engineer", "fake-carlos-lopez"),
            ("s3", "María Rodríguez", "ML Specialist", "fake-maria-rodriguez"),
            ("s4", "Javier Martínez", "DevOps Engineer", "fake-javier-martinez"),
            ("s5", "Sofia Hernández", "Security Expert", "fake-sofia-hernandez"),
            ("s6", "Miguel Torres", "Product Manager", "fake-miguel-torres"),
            ("s7", "Laura Díaz", "Software Engineer", "fake-laura-diaz"),
            ("s8", "David Ruiz", "CTO", "fake-david-ruiz"),
        ]
        .into_iter()
        .map(|(key, name, role, handle)| {
            (
                SpeakerKey(key.to_string()),
                Speaker {
                    name: name.into(),
                    role: role.into(),
                    profile_link: format!("https://linkedin.com/in/{}", handle),
                },
            )
        })
        .collect();

        let talks = [
            (
                "t1",
                "Keynote: El Futuro de la Nube",
                &["s8"][..],
                "General",
                "Visión general de las tendencias y el futuro de Google Cloud.",
                "09:00 - 10:00",
            ),
            (
                "t2",
                "Arquitecturas Serverless Escalables",
                &["s1", "s7"][..],
                "Infraestructura",
                "Cómo construir aplicaciones que escalan automáticamente con Cloud Run y Functions.",
                "10:15 - 11:00",
            ),
            (
                "t3",
                "BigQuery para Analítica en Tiempo Real",
                &["s2"][..],
                "Data",
                "Estrategias para procesar y analizar grandes volúmenes de datos al instante.",
                "11:15 - 12:00",
            ),
            (
                "t4",
                "Machine Learning con Vertex AI",
                &["s3"][..],
                "AI/ML",
                "Desarrollo y despliegue de modelos de ML simplificado.",
                "12:15 - 13:00",
            ),
            (
                "lunch",
                "Almuerzo y Networking",
                &[][..],
                "Break",
                "Tiempo libre para comer y conectar con otros asistentes.",
                "13:00 - 14:00",
            ),
            (
                "t5",
                "Seguridad en la Nube: Mejores Prácticas",
                &["s5"][..],
                "Seguridad",
                "Protegiendo tus cargas de trabajo en GCP.",
                "14:00 - 14:45",
            ),
            (
                "t6",
                "Kubernetes: De Cero a Héroe",
                &["s4", "s1"][..],
                "Infraestructura",
                "Domina la orquestación de contenedores con GKE.",
                "15:00 - 15:45",
            ),
            (
                "t7",
                "Innovación con Generative AI",
                &["s3", "s6"][..],
                "AI/ML",
                "Casos de uso prácticos de IA generativa en empresas.",
                "16:00 - 16:45",
            ),
            (
                "t8",
                "Cierre y Conclusiones",
                &["s6"][..],
                "General",
                "Resumen del día y pasos a seguir.",
                "17:00 - 17:30",
            ),
        ]
        .into_iter()
        .map(|(id, title, speakers, category, description, time)| Talk {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            description: description.into(),
            time: time.into(),
            speakers: speakers
                .iter()
                .map(|k| SpeakerKey(k.to_string()))
                .collect(),
        })
        .collect();

        Self::assemble(event, speakers, talks)
    }
}

impl TryFrom<FixtureFile> for FixtureRepo {
    type Error = CoreError;

    fn try_from(file: FixtureFile) -> Result<Self, Self::Error> {
        Self::new(file.event, file.speakers, file.talks)
    }
}

impl CatalogRepository for FixtureRepo {
    fn event_info(&self) -> &EventInfo {
        &self.event
    }

    fn all_talks(&self) -> &[Talk] {
        &self.talks
    }

    fn speaker_by_id(&self, key: &SpeakerKey) -> Option<&Speaker> {
        self.index.get(key).and_then(|&pos| self.speakers.get(pos))
    }

    fn all_speakers(&self) -> &[Speaker] {
        &self.speakers
    }
}
