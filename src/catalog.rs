//! Built-in catalog used to seed category content.

/// Stage of a construction project and the machine types it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPhase {
    pub name: &'static str,
    pub machines: &'static [&'static str],
}

pub const WORK_PHASES: &[WorkPhase] = &[
    WorkPhase {
        name: "Canteiro de obras",
        machines: &[
            "Geradores",
            "Compressores",
            "Ferramentas Elétricas",
            "Ferramentas Manuais",
            "Equipamentos de Segurança",
        ],
    },
    WorkPhase {
        name: "Cobertura",
        machines: &["Andaimes", "Escadas", "Guinchos", "Plataformas Elevatórias"],
    },
    WorkPhase {
        name: "Fundação",
        machines: &[
            "Escavadeiras",
            "Retroescavadeiras",
            "Compactadores",
            "Placas Vibratórias",
        ],
    },
    WorkPhase {
        name: "Estrutura e alvenaria",
        machines: &[
            "Betoneiras",
            "Vibradores de Concreto",
            "Bombas de Concreto",
            "Andaimes",
            "Escoras",
            "Formas",
        ],
    },
    WorkPhase {
        name: "Inst. elétricas e hidrossanitárias",
        machines: &[
            "Furadeiras",
            "Marteletes",
            "Ferramentas Elétricas",
            "Equipamentos de Medição",
        ],
    },
    WorkPhase {
        name: "Esquadrias",
        machines: &["Serras", "Furadeiras", "Parafusadeiras", "Ferramentas Manuais"],
    },
    WorkPhase {
        name: "Revestimento",
        machines: &[
            "Lixadeiras",
            "Misturadores",
            "Desempenadeiras",
            "Réguas Vibratórias",
        ],
    },
    WorkPhase {
        name: "Acabamento",
        machines: &["Lixadeiras", "Pinturas", "Compressores", "Ferramentas Manuais"],
    },
    WorkPhase {
        name: "Jardinagem",
        machines: &[
            "Cortadores de Grama",
            "Roçadeiras",
            "Motosserras",
            "Ferramentas de Jardim",
        ],
    },
    WorkPhase {
        name: "Limpeza",
        machines: &[
            "Lavadoras de Alta Pressão",
            "Aspiradores",
            "Varredeiras",
            "Equipamentos de Limpeza",
        ],
    },
];

/// Machine subcategories grouped by equipment family.
pub const MACHINE_SUBCATEGORIES: &[(&str, &[&str])] = &[
    (
        "Movimentação de Terra",
        &[
            "Escavadeiras",
            "Retroescavadeiras",
            "Pás-carregadeiras",
            "Mini-carregadeiras",
        ],
    ),
    (
        "Compactação",
        &["Compactadores", "Placas Vibratórias", "Rolos Compactadores"],
    ),
    (
        "Concretagem",
        &["Betoneiras", "Vibradores de Concreto", "Bombas de Concreto"],
    ),
    (
        "Elevação",
        &["Guindastes", "Guinchos", "Plataformas Elevatórias"],
    ),
    ("Estruturas", &["Andaimes", "Escoras", "Formas"]),
    ("Energia e Ar", &["Geradores", "Compressores"]),
    (
        "Ferramentas",
        &[
            "Ferramentas Elétricas",
            "Ferramentas Manuais",
            "Equipamentos de Pintura",
            "Equipamentos de Solda",
            "Equipamentos de Corte",
        ],
    ),
    (
        "Equipamentos de Apoio",
        &["Equipamentos de Medição", "Equipamentos de Segurança"],
    ),
];

/// Top level machine category shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
    pub icon: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub text_color: &'static str,
}

pub const DEFAULT_CATEGORY_IMAGE_URL: &str = "https://images.unsplash.com/photo-1581094288338-2314dddb7ece?auto=format&fit=crop&q=80&w=800";
pub const DEFAULT_CATEGORY_IMAGE_PHOTOGRAPHER: &str = "Unsplash";
pub const DEFAULT_CATEGORY_IMAGE_SOURCE: &str =
    "https://unsplash.com/photos/construction-site-machines";

pub const MACHINE_CATEGORIES: &[CatalogCategory] = &[CatalogCategory {
    id: "construction",
    name: "Construção Civil",
    description: "Máquinas e equipamentos para construção civil",
    image_url: DEFAULT_CATEGORY_IMAGE_URL,
    icon: "construction",
    primary_color: "#2c3e50",
    secondary_color: "#34495e",
    text_color: "#ffffff",
}];

/// Machine types listed under a catalog category: every subcategory of every
/// equipment family followed by the work phase names.
pub fn machine_types(category_id: &str) -> Vec<&'static str> {
    if category_id != "construction" {
        return Vec::new();
    }
    MACHINE_SUBCATEGORIES
        .iter()
        .flat_map(|(_, machines)| machines.iter().copied())
        .chain(WORK_PHASES.iter().map(|phase| phase.name))
        .collect()
}

/// Icon slug of a work phase, e.g. `phase-canteiro-de-obras`.
pub fn phase_icon(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("phase-{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_lists_families_then_phases() {
        let types = machine_types("construction");
        assert_eq!(types.first(), Some(&"Escavadeiras"));
        assert_eq!(types.last(), Some(&"Limpeza"));
        assert!(machine_types("tools").is_empty());
    }

    #[test]
    fn phase_icons_are_slugs() {
        assert_eq!(phase_icon("Canteiro de obras"), "phase-canteiro-de-obras");
        assert_eq!(
            phase_icon("Inst. elétricas e hidrossanitárias"),
            "phase-inst.-elétricas-e-hidrossanitárias"
        );
    }
}
