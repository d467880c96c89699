//! Static prompt catalog.
//!
//! Five parameterized task templates that walk a calling agent through
//! multi-tool taxonomic workflows. Pure data plus string templating; the
//! only coupling to the rest of the crate is that templates reference the
//! operation catalog by name.

use rmcp::ErrorData as McpError;
use rmcp::model::{
    GetPromptResult, Prompt, PromptArgument, PromptMessage, PromptMessageRole,
};
use serde_json::Value;

fn argument(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(required),
    }
}

fn prompt(name: &str, description: &str, arguments: Vec<PromptArgument>) -> Prompt {
    Prompt {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        arguments: Some(arguments),
        icons: None,
        meta: None,
    }
}

/// The full prompt catalog, in presentation order.
#[must_use]
pub fn catalog() -> Vec<Prompt> {
    vec![
        prompt(
            "complete_taxonomy_profile",
            "Build a complete taxonomic profile for any organism including hierarchy, \
             related species, and classification details",
            vec![argument(
                "organism_name",
                "Scientific name of the organism to profile",
                true,
            )],
        ),
        prompt(
            "compare_species_relationships",
            "Compare the taxonomic relationships between multiple species to understand \
             their evolutionary connections",
            vec![argument(
                "species_list",
                "Comma-separated list of scientific names to compare",
                true,
            )],
        ),
        prompt(
            "biodiversity_survey",
            "Conduct a biodiversity survey of a specific taxonomic group to understand \
             species diversity and distribution",
            vec![
                argument(
                    "taxonomic_group",
                    "The taxonomic group to survey (kingdom, phylum, class, order, family, or genus)",
                    true,
                ),
                argument("group_name", "Name of the specific taxonomic group", true),
                argument(
                    "sample_size",
                    "Number of species to include in detailed analysis (default: 20)",
                    false,
                ),
            ],
        ),
        prompt(
            "taxonomic_verification_audit",
            "Verify and audit a list of scientific names for taxonomic accuracy and \
             current classification status",
            vec![argument(
                "names_to_verify",
                "Comma-separated list of scientific names to verify",
                true,
            )],
        ),
        prompt(
            "taxonomy_teaching_module",
            "Create educational content demonstrating taxonomic principles using real \
             organism examples",
            vec![
                argument(
                    "education_level",
                    "Target education level: elementary, middle_school, high_school, \
                     undergraduate, graduate",
                    true,
                ),
                argument(
                    "concept_focus",
                    "Specific concept to teach: hierarchy, classification, \
                     binomial_nomenclature, evolution, biodiversity",
                    true,
                ),
            ],
        ),
    ]
}

/// Renders one prompt with its arguments substituted.
///
/// # Errors
///
/// Returns an invalid-params `McpError` for a name outside the catalog.
pub fn render(
    name: &str,
    arguments: Option<&serde_json::Map<String, Value>>,
) -> Result<GetPromptResult, McpError> {
    let arg = |key: &str, default: &str| {
        arguments
            .and_then(|map| map.get(key))
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    let text = match name {
        "complete_taxonomy_profile" => {
            let organism = arg("organism_name", "Homo sapiens");
            format!(
                "I need to build a complete taxonomic profile for {organism}. Please:\n\n\
                 1. First, use search_by_scientific_name to find the organism and get its TSN and basic information\n\
                 2. Use get_hierarchy to retrieve the complete taxonomic hierarchy from Kingdom to Species\n\
                 3. Use explore_taxonomy with level 'siblings' to find other species in the same genus\n\
                 4. Use explore_taxonomy with level 'family' to find other species in the same family\n\
                 5. Present the information in a structured format showing:\n\
                    - Basic organism details (TSN, scientific name, rank)\n\
                    - Complete taxonomic hierarchy\n\
                    - Related species at genus level\n\
                    - Related species at family level\n\
                    - Summary of taxonomic relationships\n\n\
                 Format the response as a comprehensive taxonomic report."
            )
        }
        "compare_species_relationships" => {
            let species = arg("species_list", "Homo sapiens, Pan troglodytes");
            format!(
                "I need to compare the taxonomic relationships between these species: {species}. Please:\n\n\
                 1. For each species in the list, use search_by_scientific_name to get basic taxonomic information\n\
                 2. For each species, use get_hierarchy to get the complete taxonomic classification\n\
                 3. Analyze the hierarchies to identify:\n\
                    - Shared taxonomic levels (where they diverge in classification)\n\
                    - Common ancestors at different taxonomic ranks\n\
                    - Degree of relatedness\n\
                 4. Present a comparative analysis showing:\n\
                    - Side-by-side taxonomic classifications\n\
                    - Evolutionary relationships and divergence points\n\
                    - Shared taxonomic groups\n\
                    - Summary of how closely related these species are\n\n\
                 Format as a comparative taxonomic analysis with clear relationship mappings."
            )
        }
        "biodiversity_survey" => {
            let group = arg("taxonomic_group", "kingdom");
            let group_name = arg("group_name", "Animalia");
            let sample_size = arg("sample_size", "20");
            format!(
                "I need to conduct a biodiversity survey of {group} {group_name}. Please:\n\n\
                 1. Use the appropriate search tool (search_by_kingdom, search_by_rank, or search_itis with filters) to get an overview of species in this group\n\
                 2. Get statistics on total number of species using get_statistics or targeted searches\n\
                 3. Sample {sample_size} representative species and for each:\n\
                    - Get detailed taxonomic information\n\
                    - Retrieve hierarchical classification\n\
                 4. Analyze patterns in the data:\n\
                    - Diversity at different taxonomic levels\n\
                    - Representative families/genera\n\
                    - Distribution across higher taxonomic groups\n\
                 5. Present findings as:\n\
                    - Executive summary of biodiversity\n\
                    - Statistical overview\n\
                    - Representative species profiles\n\
                    - Taxonomic diversity analysis\n\
                    - Conservation implications if relevant\n\n\
                 Format as a scientific biodiversity assessment report."
            )
        }
        "taxonomic_verification_audit" => {
            let names = arg("names_to_verify", "Homo sapiens, Tyrannosaurus rex");
            format!(
                "I need to verify the taxonomic accuracy of these scientific names: {names}. Please:\n\n\
                 1. For each name, use search_by_scientific_name to check if it exists in ITIS\n\
                 2. For valid names, use get_hierarchy to confirm current taxonomic classification\n\
                 3. Use autocomplete_search with partial names to find potential alternatives for invalid names\n\
                 4. For each name, determine:\n\
                    - Validity status (valid/invalid/uncertain)\n\
                    - Current accepted classification\n\
                    - TSN (Taxonomic Serial Number)\n\
                    - Potential synonyms or alternatives\n\
                 5. Present results as:\n\
                    - Summary table of verification results\n\
                    - Detailed findings for each name\n\
                    - Recommendations for invalid names\n\
                    - Standard reference format for valid names\n\n\
                 Format as a taxonomic verification report with clear recommendations."
            )
        }
        "taxonomy_teaching_module" => {
            let level = arg("education_level", "high_school");
            let concept = arg("concept_focus", "hierarchy");
            format!(
                "I need to create educational content about {concept} for {level} students. Please:\n\n\
                 1. Select appropriate example organisms based on education level (familiar species for lower levels, diverse examples for higher levels)\n\
                 2. Use search_by_scientific_name and get_hierarchy to get complete taxonomic information for examples\n\
                 3. Use explore_taxonomy to find related species that illustrate key concepts\n\
                 4. For {concept}, develop:\n\
                    - Clear explanations with real examples\n\
                    - Progressive complexity appropriate to level\n\
                    - Interactive elements using the data\n\
                    - Assessment questions\n\
                 5. Present as:\n\
                    - Structured lesson plan\n\
                    - Example organism profiles\n\
                    - Activities and exercises\n\
                    - Assessment materials\n\
                    - Extension activities\n\n\
                 Format as a complete educational module with engaging, level-appropriate content."
            )
        }
        other => {
            return Err(McpError::invalid_params(
                format!("Unknown prompt: {other}"),
                None,
            ));
        }
    };

    Ok(GetPromptResult {
        description: None,
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    })
}
