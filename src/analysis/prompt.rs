/// Instructions sent alongside every meal photo
pub const ANALYSIS_PROMPT: &str = "\
Analyze this meal image and provide a comprehensive nutritional assessment:

1. IDENTIFICATION:
   - Identify all visible foods and ingredients in this meal

2. NUTRITIONAL EVALUATION:
   - Estimate the nutrition score of this meal on a scale of 1-10
   - How balanced is this meal? Score 1-10
   - How healthy is this meal overall? Score 1-10
   - How sustainable is this meal environmentally? Score 1-10

3. IMPROVEMENTS:
   - Identify any unhealthy or unsustainable ingredients
   - Suggest specific healthier and more sustainable alternatives
   - Justify each recommendation with brief nutritional facts

Format your response in clear sections with headings and bullet points where appropriate.
";
